//! Availability scoring.
//!
//! Reduces the three raw signals (per-service sweep, critical-path result,
//! concurrency result) to a 0-100 fitness score with a penalty breakdown.
//! `compute` is a pure function of its inputs plus the configured thresholds.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::config::FitnessThresholds;
use crate::path::PathResult;
use crate::probe::ConcurrencyResult;
use crate::service::ServiceResult;

/// Penalty categories applied to the base score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Penalty {
    /// Per-occurrence deduction for services over the response-time
    /// threshold.
    SlowServices,
    /// Flat deduction for a failed critical path.
    CriticalPathFailure,
    /// Flat deduction for concurrent success below the configured minimum.
    LowConcurrencySuccess,
}

impl fmt::Display for Penalty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Penalty::SlowServices => "slow-services",
            Penalty::CriticalPathFailure => "critical-path-failure",
            Penalty::LowConcurrencySuccess => "low-concurrency-success",
        };
        f.write_str(name)
    }
}

/// The 0–100 availability verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitnessScore {
    /// `clamp(base − Σ penalties, 0, 100)`.
    pub overall_score: f64,
    /// Whether `overall_score` reaches the configured minimum.
    pub is_healthy: bool,
    /// Points deducted per penalty category. Only applied penalties appear.
    pub breakdown: BTreeMap<Penalty, f64>,
}

/// Reduces raw results to a [`FitnessScore`].
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    thresholds: FitnessThresholds,
}

impl ScoreCalculator {
    /// Create a calculator with the given thresholds.
    pub fn new(thresholds: FitnessThresholds) -> Self {
        Self { thresholds }
    }

    /// The thresholds this calculator scores against.
    pub fn thresholds(&self) -> &FitnessThresholds {
        &self.thresholds
    }

    /// Compute the fitness score from the three raw signals.
    pub fn compute(
        &self,
        service_results: &[ServiceResult],
        path_result: &PathResult,
        concurrency_result: &ConcurrencyResult,
    ) -> FitnessScore {
        let base = if service_results.is_empty() {
            0.0
        } else {
            let healthy = service_results.iter().filter(|r| r.succeeded).count();
            100.0 * healthy as f64 / service_results.len() as f64
        };

        let mut breakdown = BTreeMap::new();

        let slow = service_results
            .iter()
            .filter(|r| r.is_slow(self.thresholds.max_response_time))
            .count();
        if slow > 0 {
            breakdown.insert(
                Penalty::SlowServices,
                slow as f64 * self.thresholds.slow_service_penalty,
            );
        }

        if !path_result.succeeded {
            breakdown.insert(
                Penalty::CriticalPathFailure,
                self.thresholds.path_failure_penalty,
            );
        }

        if concurrency_result.success_rate < self.thresholds.min_concurrency_success_rate() {
            breakdown.insert(
                Penalty::LowConcurrencySuccess,
                self.thresholds.concurrency_penalty,
            );
        }

        let deducted: f64 = breakdown.values().sum();
        let overall_score = (base - deducted).clamp(0.0, 100.0);

        FitnessScore {
            overall_score,
            is_healthy: overall_score >= self.thresholds.min_availability_score,
            breakdown,
        }
    }
}
