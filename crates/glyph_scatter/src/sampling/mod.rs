//! Initial site generation for the distribution pipeline.
//!
//! Samplers produce the starting layout handed to the relaxation loop. Index
//! identity starts here: site `i` of the returned set stays site `i` through
//! every relaxation round.
use glam::DVec2;
use mint::Vector2;
use rand::RngCore;

pub mod uniform_random;

pub use uniform_random::UniformRandomSampling;

/// Trait for initial site sampling.
pub trait SiteSampling: Send + Sync {
    /// Generate `count` sites inside `[0, extent.x) x [0, extent.y)`.
    ///
    /// Duplicates are legal output; the relaxation loop tolerates them.
    fn generate(&self, count: usize, extent: Vector2<f64>, rng: &mut dyn RngCore) -> Vec<DVec2>;
}

/// Generate a random float in the range [0, 1) with 53 bits of precision.
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}
