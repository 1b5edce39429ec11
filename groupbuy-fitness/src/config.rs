//! Threshold configuration.
//!
//! The two documented healthy thresholds (80 for the strict deployment, 70
//! for the lenient one) are both plain configured values: the default is 80
//! and the `ALERT_THRESHOLD` environment variable overrides it. Nothing is
//! hard-coded at a call site.

use std::time::Duration;

use serde::Serialize;

use crate::error::{HarnessError, HarnessResult};

/// Environment variable overriding [`FitnessThresholds::min_availability_score`].
pub const ALERT_THRESHOLD_ENV: &str = "ALERT_THRESHOLD";

/// Thresholds and penalty weights for availability scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitnessThresholds {
    /// Per-service slowness threshold, doubling as the critical-path time
    /// budget.
    #[serde(serialize_with = "crate::duration_secs::serialize")]
    pub max_response_time: Duration,
    /// Tolerated fraction of failed concurrent runs.
    pub max_failure_rate: f64,
    /// Minimum overall score for the system to count as healthy.
    pub min_availability_score: f64,
    /// Points deducted per service exceeding `max_response_time`.
    pub slow_service_penalty: f64,
    /// Flat deduction when the critical path fails.
    pub path_failure_penalty: f64,
    /// Flat deduction when concurrent success falls below the minimum.
    pub concurrency_penalty: f64,
}

impl Default for FitnessThresholds {
    fn default() -> Self {
        Self {
            max_response_time: Duration::from_secs(2),
            max_failure_rate: 0.05,
            min_availability_score: 80.0,
            slow_service_penalty: 5.0,
            path_failure_penalty: 30.0,
            concurrency_penalty: 20.0,
        }
    }
}

impl FitnessThresholds {
    /// Minimum concurrent success rate, derived from `max_failure_rate`.
    pub fn min_concurrency_success_rate(&self) -> f64 {
        1.0 - self.max_failure_rate
    }

    /// Defaults with the `ALERT_THRESHOLD` environment override applied.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Validation`] when the override is not a
    /// number or the resulting configuration is out of range.
    pub fn from_env() -> HarnessResult<Self> {
        let mut thresholds = Self::default();
        if let Ok(raw) = std::env::var(ALERT_THRESHOLD_ENV) {
            let score: f64 = raw.parse().map_err(|_| {
                HarnessError::Validation(format!(
                    "{ALERT_THRESHOLD_ENV} must be a number, got '{raw}'"
                ))
            })?;
            thresholds.min_availability_score = score;
        }
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check every threshold for range errors.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Validation`] naming the offending field.
    pub fn validate(&self) -> HarnessResult<()> {
        if self.max_response_time.is_zero() {
            return Err(HarnessError::Validation(
                "max_response_time must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.max_failure_rate) {
            return Err(HarnessError::Validation(format!(
                "max_failure_rate must be within [0, 1], got {}",
                self.max_failure_rate
            )));
        }
        if !(0.0..=100.0).contains(&self.min_availability_score) {
            return Err(HarnessError::Validation(format!(
                "min_availability_score must be within [0, 100], got {}",
                self.min_availability_score
            )));
        }
        for (name, value) in [
            ("slow_service_penalty", self.slow_service_penalty),
            ("path_failure_penalty", self.path_failure_penalty),
            ("concurrency_penalty", self.concurrency_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(HarnessError::Validation(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
