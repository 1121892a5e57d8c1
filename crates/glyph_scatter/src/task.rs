//! Background execution of a distribution with cooperative cancellation.
//!
//! Relaxation over many sites and rounds can take long enough to stall an
//! interactive caller, so the pipeline is also exposed as a task computed on
//! its own thread. Ambient randomness only enters here, at the outermost
//! boundary ([`DistributionTask::spawn_entropy`]); everything below takes an
//! injected generator.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::distribute::{DistributionConfig, DistributionResult, Distributor};
use crate::error::{Error, Result};

/// Cooperative cancellation flag shared between a task and its owner.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. The computation stops at the next round boundary.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Handle to a distribution computed on a background thread.
///
/// The computation checks its cancel token between relaxation rounds, so a
/// cancelled task stops before exhausting the iteration budget and joins with
/// [`Error::Cancelled`].
pub struct DistributionTask {
    handle: JoinHandle<Result<DistributionResult>>,
    cancel: CancelToken,
}

impl DistributionTask {
    /// Spawns a distribution seeded from `seed`.
    ///
    /// Identical seed and configuration produce bit-identical results.
    pub fn spawn(count: usize, config: DistributionConfig, seed: u64) -> Self {
        Self::spawn_with_rng(count, config, StdRng::seed_from_u64(seed))
    }

    /// Spawns a distribution seeded from operating-system entropy.
    pub fn spawn_entropy(count: usize, config: DistributionConfig) -> Self {
        Self::spawn_with_rng(count, config, StdRng::from_os_rng())
    }

    fn spawn_with_rng(count: usize, config: DistributionConfig, mut rng: StdRng) -> Self {
        let cancel = CancelToken::new();
        let token = cancel.clone();
        let handle = thread::spawn(move || {
            Distributor::default().run_with_cancel(count, &config, &mut rng, Some(&token))
        });
        Self { handle, cancel }
    }

    /// Requests cancellation without waiting for the task to observe it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the task finishes and returns its result.
    pub fn join(self) -> Result<DistributionResult> {
        match self.handle.join() {
            Ok(result) => result,
            Err(_) => Err(Error::Other("distribution task panicked".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_task_delivers_the_distribution() {
        let config = DistributionConfig::new(100.0, 100.0).with_max_iterations(8);
        let task = DistributionTask::spawn(16, config, 42);
        let result = task.join().unwrap();
        assert_eq!(result.points.len(), 16);
    }

    #[test]
    fn same_seed_tasks_agree() {
        let config = DistributionConfig::new(100.0, 100.0).with_max_iterations(6);
        let a = DistributionTask::spawn(12, config.clone(), 7).join().unwrap();
        let b = DistributionTask::spawn(12, config, 7).join().unwrap();
        assert_eq!(a.points, b.points);
    }

    #[test]
    fn cancelled_task_either_aborts_or_was_already_done() {
        // The race between cancel and completion is inherent; both outcomes
        // are legal, silent corruption is not.
        let config = DistributionConfig::new(100.0, 100.0)
            .with_max_iterations(10_000)
            .with_acceptable_error(0.0);
        let task = DistributionTask::spawn(200, config, 13);
        task.cancel();
        match task.join() {
            Err(Error::Cancelled) => {}
            Ok(result) => assert_eq!(result.points.len(), 200),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn token_flips_once_cancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        let observer = token.clone();
        token.cancel();
        assert!(observer.is_cancelled());
    }
}
