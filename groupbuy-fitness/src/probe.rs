//! Concurrent load probing.
//!
//! Issues N independent critical-path runs and reduces them to a success rate
//! and throughput. Runs interleave cooperatively on the current-thread
//! runtime; independence comes from forking the random stream per run and
//! from the fleet staying immutable for the whole batch.

use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tracing::debug;

use crate::error::{HarnessError, HarnessResult};
use crate::path::CriticalPathRunner;
use crate::providers::{Clock, Providers};
use crate::service::{ServiceFleet, ServiceSimulator};

/// Aggregate outcome of one concurrent batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcurrencyResult {
    /// Number of critical-path runs attempted.
    pub attempted: usize,
    /// Number of runs that succeeded.
    pub succeeded: usize,
    /// `succeeded / attempted`, in [0, 1].
    pub success_rate: f64,
    /// Successful runs per second over the batch span. Reports `0.0` when
    /// the span is unmeasurable rather than dividing by zero.
    pub throughput: f64,
    /// Wall span of the whole batch on the injected clock.
    #[serde(serialize_with = "crate::duration_secs::serialize")]
    pub elapsed: Duration,
}

/// Runs critical-path batches under simulated concurrent load.
pub struct ConcurrencyProbe<'a, P: Providers> {
    simulator: &'a ServiceSimulator<P>,
    fleet: &'a ServiceFleet,
    budget: Duration,
}

impl<'a, P: Providers> ConcurrencyProbe<'a, P> {
    /// Create a probe reusing the harness simulator and path budget.
    pub fn new(
        simulator: &'a ServiceSimulator<P>,
        fleet: &'a ServiceFleet,
        budget: Duration,
    ) -> Self {
        Self {
            simulator,
            fleet,
            budget,
        }
    }

    /// Run `n` independent critical-path runs concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Validation`] when `n` is zero.
    pub async fn run_concurrent(&self, n: usize) -> HarnessResult<ConcurrencyResult> {
        if n == 0 {
            return Err(HarnessError::Validation(
                "concurrent request count must be at least 1".to_string(),
            ));
        }

        let clock = self.simulator.providers().clock();
        let started = clock.now();

        let runs = (0..n).map(|_| {
            let simulator = self.simulator.fork();
            async move {
                CriticalPathRunner::new(&simulator, self.fleet, self.budget)
                    .run_critical_path()
                    .await
            }
        });
        let results = join_all(runs).await;

        let elapsed = clock.now().saturating_sub(started);
        let succeeded = results.iter().filter(|r| r.succeeded).count();
        let success_rate = succeeded as f64 / n as f64;
        let throughput = if elapsed.is_zero() {
            0.0
        } else {
            succeeded as f64 / elapsed.as_secs_f64()
        };
        debug!(attempted = n, succeeded, ?elapsed, "concurrent batch done");

        Ok(ConcurrencyResult {
            attempted: n,
            succeeded,
            success_rate,
            throughput,
            elapsed,
        })
    }
}
