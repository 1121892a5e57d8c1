//! End-to-end distribution pipeline: configuration, sampling, relaxation, sorting.
use glam::DVec2;
use rand::RngCore;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::geometry::{DelaunayProvider, GeometryProvider, Rect};
use crate::relax::relax_with_cancel;
use crate::sampling::{SiteSampling, UniformRandomSampling};
use crate::sort::{sort_sites, SortStrategy};
use crate::task::CancelToken;

/// Side length of the square substituted when the configured rectangle is not
/// strictly positive.
pub const FALLBACK_EXTENT: f64 = 100.0;

/// Configuration for computing a point distribution.
#[non_exhaustive]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionConfig {
    /// Width of the target rectangle.
    pub width: f64,
    /// Height of the target rectangle.
    pub height: f64,
    /// Maximum number of relaxation rounds. Zero keeps the initial sample.
    pub max_iterations: u32,
    /// Per-axis displacement threshold at which relaxation stops early.
    pub acceptable_error: f64,
    /// Ordering applied to the finished set.
    pub sorting: SortStrategy,
    /// Weight of y in the cost-function ordering. May be negative.
    pub cost_function_y_weight: f64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            max_iterations: 20,
            acceptable_error: 1e-6,
            sorting: SortStrategy::None,
            cost_function_y_weight: 1.0,
        }
    }
}

impl DistributionConfig {
    /// Creates a configuration for the given rectangle with default tuning.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Sets the relaxation round budget.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the early-stop displacement threshold.
    pub fn with_acceptable_error(mut self, acceptable_error: f64) -> Self {
        self.acceptable_error = acceptable_error;
        self
    }

    /// Sets the ordering strategy.
    pub fn with_sorting(mut self, sorting: SortStrategy) -> Self {
        self.sorting = sorting;
        self
    }

    /// Sets the y weight of the cost-function ordering.
    pub fn with_cost_function_y_weight(mut self, cost_function_y_weight: f64) -> Self {
        self.cost_function_y_weight = cost_function_y_weight;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    ///
    /// A non-positive rectangle is not an error; it triggers the fallback
    /// substitution instead (see [`DistributionConfig::effective_rect`]).
    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(Error::InvalidConfig("width and height must be finite".into()));
        }
        if !self.acceptable_error.is_finite() || self.acceptable_error < 0.0 {
            return Err(Error::InvalidConfig(
                "acceptable_error must be finite and >= 0".into(),
            ));
        }
        if !self.cost_function_y_weight.is_finite() {
            return Err(Error::InvalidConfig(
                "cost_function_y_weight must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Rectangle actually used for the computation.
    ///
    /// A non-positive width or height replaces the whole rectangle with the
    /// fallback square, never one dimension in isolation.
    pub fn effective_rect(&self) -> Rect {
        let rect = Rect::new(self.width, self.height);
        if rect.is_valid() {
            rect
        } else {
            Rect::new(FALLBACK_EXTENT, FALLBACK_EXTENT)
        }
    }
}

/// Result of a distribution run.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct DistributionResult {
    /// The distributed points, ordered per the configured strategy.
    pub points: Vec<DVec2>,
    /// Relaxation rounds performed.
    pub iterations: u32,
    /// Whether relaxation hit the error threshold before the budget.
    pub converged: bool,
}

/// Computes `count` evenly distributed points with the default sampler and
/// geometry provider. See [`Distributor`] for injectable seams.
pub fn compute_distribution(
    count: usize,
    config: &DistributionConfig,
    rng: &mut dyn RngCore,
) -> Result<DistributionResult> {
    Distributor::default().run(count, config, rng)
}

/// Like [`compute_distribution`], checking `cancel` between relaxation rounds.
pub fn compute_distribution_with_cancel(
    count: usize,
    config: &DistributionConfig,
    rng: &mut dyn RngCore,
    cancel: &CancelToken,
) -> Result<DistributionResult> {
    Distributor::default().run_with_cancel(count, config, rng, Some(cancel))
}

/// Distribution pipeline with injectable sampling and geometry seams.
pub struct Distributor {
    sampling: Box<dyn SiteSampling>,
    geometry: Box<dyn GeometryProvider>,
}

impl Default for Distributor {
    fn default() -> Self {
        Self {
            sampling: Box::new(UniformRandomSampling),
            geometry: Box::new(DelaunayProvider::new()),
        }
    }
}

impl Distributor {
    /// Creates a pipeline around a custom sampler and geometry provider.
    pub fn new(sampling: Box<dyn SiteSampling>, geometry: Box<dyn GeometryProvider>) -> Self {
        Self { sampling, geometry }
    }

    /// Runs the pipeline: validate, sample, relax, sort.
    pub fn run(
        &self,
        count: usize,
        config: &DistributionConfig,
        rng: &mut dyn RngCore,
    ) -> Result<DistributionResult> {
        self.run_with_cancel(count, config, rng, None)
    }

    pub fn run_with_cancel(
        &self,
        count: usize,
        config: &DistributionConfig,
        rng: &mut dyn RngCore,
        cancel: Option<&CancelToken>,
    ) -> Result<DistributionResult> {
        config.validate()?;
        if count == 0 {
            return Ok(DistributionResult::default());
        }

        if !Rect::new(config.width, config.height).is_valid() {
            warn!(
                width = config.width,
                height = config.height,
                "non-positive rectangle, substituting {FALLBACK_EXTENT}x{FALLBACK_EXTENT} fallback"
            );
        }
        let rect = config.effective_rect();

        let sites = self
            .sampling
            .generate(count, DVec2::new(rect.width, rect.height).into(), rng);
        if sites.len() != count {
            return Err(Error::Other(format!(
                "sampler produced {} of {count} sites",
                sites.len()
            )));
        }

        let outcome = relax_with_cancel(
            sites,
            rect,
            config.max_iterations,
            config.acceptable_error,
            self.geometry.as_ref(),
            cancel,
        )?;

        let mut points = outcome.sites;
        sort_sites(&mut points, config.sorting, config.cost_function_y_weight);

        info!(
            count,
            iterations = outcome.iterations,
            converged = outcome.converged,
            "distribution finished"
        );

        Ok(DistributionResult {
            points,
            iterations: outcome.iterations,
            converged: outcome.converged,
        })
    }
}
