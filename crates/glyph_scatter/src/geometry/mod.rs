//! Geometry primitives and the Voronoi cell provider seam.
//!
//! The relaxation loop only ever talks to a [`GeometryProvider`]; the built-in
//! [`DelaunayProvider`] backs that seam with a spade Delaunay triangulation.
use glam::DVec2;

use crate::error::Result;

pub mod delaunay;

pub use delaunay::DelaunayProvider;

/// Axis-aligned rectangle anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Far corner `(width, height)`.
    pub fn max(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Corner ring in counter-clockwise order starting at the origin.
    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::ZERO,
            DVec2::new(self.width, 0.0),
            DVec2::new(self.width, self.height),
            DVec2::new(0.0, self.height),
        ]
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

/// One site's Voronoi cell as a vertex ring, closing edge implied.
pub type CellPolygon = Vec<DVec2>;

/// Source of Voronoi cells for a site set.
pub trait GeometryProvider: Send + Sync {
    /// Returns one polygon per input site, in input order, each clipped to `rect`.
    ///
    /// For non-degenerate input the polygons partition `rect`. Coincident sites
    /// are legal input; the provider may hand them empty or shared cells, which
    /// the relaxation loop treats as degenerate.
    fn tessellate(&self, sites: &[DVec2], rect: Rect) -> Result<Vec<CellPolygon>>;
}

/// Area below which a polygon counts as degenerate.
const MIN_AREA: f64 = 1e-12;

/// Area-weighted centroid of a polygon ring, or `None` when the ring encloses
/// no area (fewer than three vertices, or all vertices collinear).
pub fn polygon_centroid(polygon: &[DVec2]) -> Option<DVec2> {
    if polygon.len() < 3 {
        return None;
    }

    let mut twice_area = 0.0;
    let mut weighted = DVec2::ZERO;
    for (i, &a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        let cross = a.x * b.y - b.x * a.y;
        twice_area += cross;
        weighted += (a + b) * cross;
    }

    if twice_area.abs() < MIN_AREA {
        return None;
    }

    Some(weighted / (3.0 * twice_area))
}
