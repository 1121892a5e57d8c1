//! Lloyd's relaxation loop.
//!
//! Each round tessellates the current sites, moves every site onto the
//! centroid of its Voronoi cell, and tracks the largest displacement per axis.
//! The loop stops when the iteration budget runs out or both axis errors fall
//! to the acceptable threshold.
use glam::DVec2;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{polygon_centroid, GeometryProvider, Rect};
use crate::task::CancelToken;

/// Slack allowed on provider output before it counts as out of bounds.
const CONTRACT_EPS: f64 = 1e-6;

/// Per-axis maxima of absolute site displacement in the most recent round.
///
/// The axes are tracked independently rather than folded into a Euclidean
/// distance, and both must fall to the threshold before the loop stops early.
/// A single outlier site on either axis keeps the loop running.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Convergence {
    pub error_x: f64,
    pub error_y: f64,
}

impl Convergence {
    /// True when both axis errors are at or below `acceptable_error`.
    pub fn within(&self, acceptable_error: f64) -> bool {
        self.error_x <= acceptable_error && self.error_y <= acceptable_error
    }
}

/// Outcome of a relaxation run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct RelaxOutcome {
    /// Final site positions, index-aligned with the input set.
    pub sites: Vec<DVec2>,
    /// Rounds actually performed.
    pub iterations: u32,
    /// Whether the loop stopped on the error threshold rather than the budget.
    pub converged: bool,
    /// Axis errors of the last round performed.
    pub convergence: Convergence,
}

/// Relaxes `sites` inside `rect` for up to `max_iterations` rounds.
///
/// With `max_iterations` of zero the input comes back unchanged. Sites whose
/// cell is degenerate (no area, as with coincident sites) sit out the round
/// with zero displacement instead of picking up a non-finite centroid.
pub fn relax(
    sites: Vec<DVec2>,
    rect: Rect,
    max_iterations: u32,
    acceptable_error: f64,
    provider: &dyn GeometryProvider,
) -> Result<RelaxOutcome> {
    relax_with_cancel(sites, rect, max_iterations, acceptable_error, provider, None)
}

/// Like [`relax`], checking `cancel` before every round.
pub fn relax_with_cancel(
    mut sites: Vec<DVec2>,
    rect: Rect,
    max_iterations: u32,
    acceptable_error: f64,
    provider: &dyn GeometryProvider,
    cancel: Option<&CancelToken>,
) -> Result<RelaxOutcome> {
    let mut iterations = 0;
    let mut converged = false;
    let mut convergence = Convergence::default();

    for round in 0..max_iterations {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(Error::Cancelled);
        }

        let cells = provider.tessellate(&sites, rect)?;
        if cells.len() != sites.len() {
            return Err(Error::Geometry(format!(
                "expected {} cells, provider returned {}",
                sites.len(),
                cells.len()
            )));
        }

        let mut round_errors = Convergence::default();
        for (site, cell) in sites.iter_mut().zip(&cells) {
            // Degenerate cell: the site sits out this round.
            let Some(centroid) = polygon_centroid(cell) else {
                continue;
            };
            if !centroid.is_finite()
                || centroid.x < -CONTRACT_EPS
                || centroid.x > rect.width + CONTRACT_EPS
                || centroid.y < -CONTRACT_EPS
                || centroid.y > rect.height + CONTRACT_EPS
            {
                return Err(Error::Geometry(format!(
                    "cell centroid {centroid} outside {}x{} bounds",
                    rect.width, rect.height
                )));
            }

            // Rounding slack from clipping is folded back onto the bounds.
            let centroid = centroid.clamp(DVec2::ZERO, rect.max());
            let delta = centroid - *site;
            round_errors.error_x = round_errors.error_x.max(delta.x.abs());
            round_errors.error_y = round_errors.error_y.max(delta.y.abs());
            *site = centroid;
        }

        iterations = round + 1;
        convergence = round_errors;
        debug!(
            round,
            error_x = convergence.error_x,
            error_y = convergence.error_y,
            "relaxation round finished"
        );

        if convergence.within(acceptable_error) {
            converged = true;
            break;
        }
    }

    Ok(RelaxOutcome {
        sites,
        iterations,
        converged,
        convergence,
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::geometry::{CellPolygon, DelaunayProvider};
    use crate::sampling::{SiteSampling, UniformRandomSampling};

    struct BrokenProvider;

    impl GeometryProvider for BrokenProvider {
        fn tessellate(&self, sites: &[DVec2], _rect: Rect) -> Result<Vec<CellPolygon>> {
            // One cell short of the contract.
            Ok(vec![Vec::new(); sites.len().saturating_sub(1)])
        }
    }

    struct EscapingProvider;

    impl GeometryProvider for EscapingProvider {
        fn tessellate(&self, sites: &[DVec2], _rect: Rect) -> Result<Vec<CellPolygon>> {
            let cell = vec![
                DVec2::new(200.0, 200.0),
                DVec2::new(300.0, 200.0),
                DVec2::new(200.0, 300.0),
            ];
            Ok(vec![cell; sites.len()])
        }
    }

    #[test]
    fn zero_iterations_returns_input_unchanged() {
        let sites = vec![DVec2::new(3.0, 4.0), DVec2::new(60.0, 70.0)];
        let outcome = relax(
            sites.clone(),
            Rect::new(100.0, 100.0),
            0,
            1e-6,
            &DelaunayProvider::new(),
        )
        .unwrap();
        assert_eq!(outcome.sites, sites);
        assert_eq!(outcome.iterations, 0);
        assert!(!outcome.converged);
    }

    #[test]
    fn single_site_converges_to_rect_center() {
        let rect = Rect::new(64.0, 32.0);
        let outcome = relax(
            vec![DVec2::new(1.0, 1.0)],
            rect,
            10,
            1e-9,
            &DelaunayProvider::new(),
        )
        .unwrap();
        assert!(outcome.converged);
        assert!((outcome.sites[0] - rect.center()).length() < 1e-9);
    }

    #[test]
    fn coincident_sites_stay_finite() {
        let rect = Rect::new(100.0, 100.0);
        let p = DVec2::new(10.0, 10.0);
        let outcome = relax(
            vec![p, p, DVec2::new(90.0, 90.0)],
            rect,
            5,
            0.0,
            &DelaunayProvider::new(),
        )
        .unwrap();
        for site in &outcome.sites {
            assert!(site.is_finite());
            assert!(rect.contains(*site));
        }
        // The coincident pair shares a cell and moves in lockstep.
        assert_eq!(outcome.sites[0], outcome.sites[1]);
    }

    #[test]
    fn sites_stay_within_bounds_every_budget() {
        let rect = Rect::new(120.0, 45.0);
        let mut rng = StdRng::seed_from_u64(5);
        let sites =
            UniformRandomSampling.generate(30, DVec2::new(rect.width, rect.height).into(), &mut rng);
        for budget in [1, 3, 8] {
            let outcome = relax(sites.clone(), rect, budget, 0.0, &DelaunayProvider::new()).unwrap();
            assert_eq!(outcome.sites.len(), 30);
            assert_eq!(outcome.iterations, budget);
            for site in &outcome.sites {
                assert!(rect.contains(*site));
            }
        }
    }

    #[test]
    fn errors_trend_downward_across_seeds() {
        // Not strictly monotonic per round; compare a short run against a long
        // one, averaged over seeds.
        let rect = Rect::new(100.0, 100.0);
        let provider = DelaunayProvider::new();
        let mut short_sum = 0.0;
        let mut long_sum = 0.0;
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let sites = UniformRandomSampling.generate(
                25,
                DVec2::new(rect.width, rect.height).into(),
                &mut rng,
            );
            let short = relax(sites.clone(), rect, 2, 0.0, &provider).unwrap();
            let long = relax(sites, rect, 25, 0.0, &provider).unwrap();
            short_sum += short.convergence.error_x + short.convergence.error_y;
            long_sum += long.convergence.error_x + long.convergence.error_y;
        }
        assert!(
            long_sum < short_sum,
            "expected errors to shrink: {long_sum} vs {short_sum}"
        );
    }

    #[test]
    fn cell_count_mismatch_is_fatal() {
        let sites = vec![DVec2::new(1.0, 1.0), DVec2::new(2.0, 2.0)];
        let err = relax(sites, Rect::new(10.0, 10.0), 1, 0.0, &BrokenProvider).unwrap_err();
        assert!(matches!(err, Error::Geometry(_)));
    }

    #[test]
    fn out_of_bounds_centroid_is_fatal() {
        let sites = vec![DVec2::new(1.0, 1.0)];
        let err = relax(sites, Rect::new(10.0, 10.0), 1, 0.0, &EscapingProvider).unwrap_err();
        assert!(matches!(err, Error::Geometry(_)));
    }

    #[test]
    fn pre_cancelled_token_stops_before_work() {
        let token = CancelToken::new();
        token.cancel();
        let err = relax_with_cancel(
            vec![DVec2::new(1.0, 1.0)],
            Rect::new(10.0, 10.0),
            5,
            0.0,
            &DelaunayProvider::new(),
            Some(&token),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }
}
