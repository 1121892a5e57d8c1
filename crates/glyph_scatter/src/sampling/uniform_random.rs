//! Uniform random site sampling.
use glam::DVec2;
use mint::Vector2;
use rand::RngCore;

use crate::sampling::{rand01, SiteSampling};

/// Uniform i.i.d. random sampling over `[0, width) x [0, height)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandomSampling;

impl SiteSampling for UniformRandomSampling {
    fn generate(&self, count: usize, extent: Vector2<f64>, rng: &mut dyn RngCore) -> Vec<DVec2> {
        let w = extent.x;
        let h = extent.y;

        if count == 0 || w <= 0.0 || h <= 0.0 {
            return Vec::new();
        }

        // Largest representable values strictly below the right/top edges.
        let max_x = w.next_down();
        let max_y = h.next_down();

        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let x = (rand01(rng) * w).clamp(0.0, max_x);
            let y = (rand01(rng) * h).clamp(0.0, max_y);
            out.push(DVec2::new(x, y));
        }

        out
    }
}
