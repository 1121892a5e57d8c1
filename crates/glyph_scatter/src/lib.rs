#![forbid(unsafe_code)]
//! glyph_scatter: evenly distributed point sets for scattered-glyph layouts.
//!
//! Given a count of items and a bounded rectangle, the crate samples initial
//! sites, spreads them out with Lloyd's relaxation on a Voronoi tessellation,
//! and reorders the converged set with a selectable strategy.
//!
//! Modules:
//! - geometry: bounding rectangle, Voronoi cell provider (spade-backed), centroids
//! - sampling: initial site generation
//! - relax: Lloyd's relaxation loop with per-axis convergence tracking
//! - sort: stable reordering of the finished set
//! - distribute: configuration, validation, and the end-to-end pipeline
//! - task: background execution with cancellation
pub mod distribute;
pub mod error;
pub mod geometry;
pub mod relax;
pub mod sampling;
pub mod sort;
pub mod task;

/// Convenient re-exports for common types. Import with `use glyph_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::distribute::{
        compute_distribution, compute_distribution_with_cancel, DistributionConfig,
        DistributionResult, Distributor, FALLBACK_EXTENT,
    };
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{
        polygon_centroid, CellPolygon, DelaunayProvider, GeometryProvider, Rect,
    };
    pub use crate::relax::{relax, relax_with_cancel, Convergence, RelaxOutcome};
    pub use crate::sampling::{SiteSampling, UniformRandomSampling};
    pub use crate::sort::{sort_sites, SortStrategy};
    pub use crate::task::{CancelToken, DistributionTask};
}
