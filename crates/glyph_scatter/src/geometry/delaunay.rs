//! Built-in geometry provider backed by a spade Delaunay triangulation.
use glam::DVec2;
use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::error::{Error, Result};
use crate::geometry::{CellPolygon, GeometryProvider, Rect};

/// Voronoi cell provider that triangulates the sites with spade and clips each
/// cell to the bounding rectangle.
///
/// A site's clipped Voronoi cell equals the rectangle intersected with the
/// perpendicular-bisector half-planes of the site's Delaunay neighbors, so each
/// cell falls out of plain polygon clipping. Hull sites and site counts below
/// three need no special casing: fewer neighbors just means fewer cuts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelaunayProvider;

impl DelaunayProvider {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryProvider for DelaunayProvider {
    fn tessellate(&self, sites: &[DVec2], rect: Rect) -> Result<Vec<CellPolygon>> {
        if sites.is_empty() {
            return Ok(Vec::new());
        }

        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
        let mut handles = Vec::with_capacity(sites.len());
        for site in sites {
            // Coincident sites collapse onto one triangulation vertex and share
            // its cell.
            let handle = triangulation
                .insert(Point2::new(site.x, site.y))
                .map_err(|e| Error::Geometry(format!("site rejected by triangulation: {e:?}")))?;
            handles.push(handle);
        }

        let mut cells = Vec::with_capacity(sites.len());
        for (site, handle) in sites.iter().zip(&handles) {
            let mut cell: CellPolygon = rect.corners().to_vec();
            for edge in triangulation.vertex(*handle).out_edges() {
                let neighbor = edge.to().position();
                cell = clip_half_plane(&cell, *site, DVec2::new(neighbor.x, neighbor.y));
                if cell.is_empty() {
                    break;
                }
            }
            cells.push(cell);
        }
        Ok(cells)
    }
}

/// Clips `polygon` to the half-plane of points at least as close to `site` as
/// to `neighbor` (Sutherland-Hodgman against the perpendicular bisector).
fn clip_half_plane(polygon: &[DVec2], site: DVec2, neighbor: DVec2) -> CellPolygon {
    if polygon.is_empty() {
        return Vec::new();
    }

    let mid = (site + neighbor) * 0.5;
    let normal = neighbor - site;

    let mut out = Vec::with_capacity(polygon.len() + 1);
    for (i, &a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        let da = (a - mid).dot(normal);
        let db = (b - mid).dot(normal);
        if da <= 0.0 {
            out.push(a);
        }
        if (da < 0.0 && db > 0.0) || (da > 0.0 && db < 0.0) {
            out.push(a + (b - a) * (da / (da - db)));
        }
    }
    out
}
