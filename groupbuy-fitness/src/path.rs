//! Critical-path execution.
//!
//! Runs the fixed seven-step purchase flow against the simulated fleet,
//! short-circuiting at the first failing step. There are no retries: the
//! point is to measure worst-case failure, not to mask it.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::providers::Providers;
use crate::service::{CRITICAL_PATH, ServiceFleet, ServiceName, ServiceResult, ServiceSimulator};

/// Why a critical-path run did not succeed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathFailure {
    /// A step failed; later steps were never attempted.
    StepFailed(ServiceName),
    /// Every step succeeded but the accumulated time blew the path budget.
    Deadline {
        /// Accumulated time over all executed steps.
        #[serde(serialize_with = "crate::duration_secs::serialize")]
        elapsed: Duration,
        /// Configured path-time budget.
        #[serde(serialize_with = "crate::duration_secs::serialize")]
        budget: Duration,
    },
}

/// Outcome of one critical-path run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Whether the full path completed within budget.
    pub succeeded: bool,
    /// Total time of the steps actually executed.
    #[serde(serialize_with = "crate::duration_secs::serialize")]
    pub total_time: Duration,
    /// Failure reason, if any.
    pub failure: Option<PathFailure>,
    /// Results of the steps actually executed, in path order.
    pub step_results: Vec<ServiceResult>,
}

impl PathResult {
    /// The first failing step, when the path failed on a step.
    ///
    /// Returns `None` for successful runs and for deadline failures.
    pub fn failed_at_step(&self) -> Option<ServiceName> {
        match self.failure {
            Some(PathFailure::StepFailed(service)) => Some(service),
            _ => None,
        }
    }
}

/// Sequences the fixed critical path over the simulated fleet.
pub struct CriticalPathRunner<'a, P: Providers> {
    simulator: &'a ServiceSimulator<P>,
    fleet: &'a ServiceFleet,
    budget: Duration,
}

impl<'a, P: Providers> CriticalPathRunner<'a, P> {
    /// Create a runner with the given path-time budget.
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

    /// Run the critical path once.
    pub async fn run_critical_path(&self) -> PathResult {
        let mut total_time = Duration::ZERO;
        let mut step_results = Vec::with_capacity(CRITICAL_PATH.len());
        let mut failure = None;

        for step in CRITICAL_PATH {
            let result = self.simulator.invoke(step.service, self.fleet).await;
            total_time += result.response_time;
            let succeeded = result.succeeded;
            debug!(step = step.label, service = %step.service, succeeded, "critical path step");
            step_results.push(result);

            if !succeeded {
                failure = Some(PathFailure::StepFailed(step.service));
                break;
            }
        }

        if failure.is_none() && total_time > self.budget {
            failure = Some(PathFailure::Deadline {
                elapsed: total_time,
                budget: self.budget,
            });
        }

        PathResult {
            succeeded: failure.is_none(),
            total_time,
            failure,
            step_results,
        }
    }
}
