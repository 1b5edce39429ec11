//! Availability report.

use std::fmt;

use serde::Serialize;

use crate::path::{PathFailure, PathResult};
use crate::probe::ConcurrencyResult;
use crate::score::FitnessScore;
use crate::service::ServiceResult;

/// Full outcome of one availability test run.
///
/// Carries the fitness verdict plus the raw detail the CI collaborators
/// render into artifacts: per-service results, critical-path detail,
/// concurrency detail, and a human-readable issue list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityReport {
    /// Aggregate 0–100 verdict.
    pub score: FitnessScore,
    /// Individual service sweep results.
    pub services: Vec<ServiceResult>,
    /// Critical-path run detail.
    pub path: PathResult,
    /// Concurrent-load probe detail.
    pub concurrency: ConcurrencyResult,
    /// Human-readable findings, empty for a clean run.
    pub issues: Vec<String>,
}

impl fmt::Display for AvailabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Availability Report ===")?;
        writeln!(f, "Overall Score: {:.1}/100", self.score.overall_score)?;
        writeln!(
            f,
            "Healthy: {}",
            if self.score.is_healthy { "yes" } else { "no" }
        )?;

        match &self.path.failure {
            None => writeln!(
                f,
                "Critical Path: ok in {:.3}s",
                self.path.total_time.as_secs_f64()
            )?,
            Some(PathFailure::StepFailed(service)) => {
                writeln!(f, "Critical Path: failed at {service}")?
            }
            Some(PathFailure::Deadline { elapsed, budget }) => writeln!(
                f,
                "Critical Path: deadline exceeded ({:.3}s > {:.3}s)",
                elapsed.as_secs_f64(),
                budget.as_secs_f64()
            )?,
        }

        writeln!(
            f,
            "Concurrency: {}/{} succeeded ({:.1}%) at {:.1} runs/s",
            self.concurrency.succeeded,
            self.concurrency.attempted,
            self.concurrency.success_rate * 100.0,
            self.concurrency.throughput
        )?;

        if !self.score.breakdown.is_empty() {
            writeln!(f)?;
            writeln!(f, "Penalties:")?;
            for (penalty, points) in &self.score.breakdown {
                writeln!(f, "  -{points:.1} {penalty}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Services:")?;
        for result in &self.services {
            let status = if result.succeeded { "ok" } else { "FAILED" };
            write!(
                f,
                "  {:<18} {:<6} {:.3}s",
                result.service.to_string(),
                status,
                result.response_time.as_secs_f64()
            )?;
            match &result.error {
                Some(error) => writeln!(f, "  {error}")?,
                None => writeln!(f)?,
            }
        }

        if !self.issues.is_empty() {
            writeln!(f)?;
            writeln!(f, "Issues: {}", self.issues.len())?;
            for issue in &self.issues {
                writeln!(f, "  - {issue}")?;
            }
        }

        Ok(())
    }
}
