//! The availability harness.
//!
//! Composes the simulator, the critical-path runner, the concurrency probe,
//! and the score calculator into the `run_availability_tests` entry point the
//! external collaborators call.

use tracing::info;

use crate::config::FitnessThresholds;
use crate::error::HarnessResult;
use crate::path::{CriticalPathRunner, PathFailure, PathResult};
use crate::probe::{ConcurrencyProbe, ConcurrencyResult};
use crate::providers::{Providers, SimProviders, TokioProviders};
use crate::report::AvailabilityReport;
use crate::scenario::{Scenario, ScenarioConfigurator};
use crate::score::ScoreCalculator;
use crate::service::{ServiceFleet, ServiceName, ServiceResult, ServiceSimulator};

/// Availability fitness harness for the simulated group-buying platform.
///
/// Owns the fleet configuration, the latency simulator, and the scoring
/// thresholds. All state mutation (scenarios, failure injection) happens
/// synchronously between runs; probes only ever read.
pub struct AvailabilityHarness<P: Providers> {
    simulator: ServiceSimulator<P>,
    fleet: ServiceFleet,
    calculator: ScoreCalculator,
    configurator: ScenarioConfigurator,
    concurrency: usize,
}

impl AvailabilityHarness<SimProviders> {
    /// Deterministic harness on logical time: same seed, same report.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SimProviders::new(seed))
    }
}

impl AvailabilityHarness<TokioProviders> {
    /// Harness on real time and real entropy, for demo pacing.
    pub fn real_time() -> Self {
        Self::new(TokioProviders::new())
    }
}

impl<P: Providers> AvailabilityHarness<P> {
    /// Create a harness with default thresholds.
    pub fn new(providers: P) -> Self {
        let thresholds = FitnessThresholds::default();
        Self {
            simulator: ServiceSimulator::new(providers, thresholds.max_response_time),
            fleet: ServiceFleet::healthy(),
            calculator: ScoreCalculator::new(thresholds),
            configurator: ScenarioConfigurator::default(),
            concurrency: crate::scenario::DEFAULT_CONCURRENCY,
        }
    }

    /// Create a harness with explicit thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HarnessError::Validation`] when a threshold is out
    /// of range.
    pub fn with_thresholds(providers: P, thresholds: FitnessThresholds) -> HarnessResult<Self> {
        thresholds.validate()?;
        let mut harness = Self::new(providers);
        harness.simulator = ServiceSimulator::new(
            harness.simulator.providers().clone(),
            thresholds.max_response_time,
        );
        harness.calculator = ScoreCalculator::new(thresholds);
        Ok(harness)
    }

    /// The configured thresholds.
    pub fn thresholds(&self) -> &FitnessThresholds {
        self.calculator.thresholds()
    }

    /// The current fleet configuration.
    pub fn fleet(&self) -> &ServiceFleet {
        &self.fleet
    }

    /// The probe batch size the next availability run will use.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Apply a named scenario preset.
    pub fn apply_scenario(&mut self, scenario: Scenario) {
        self.concurrency = self.configurator.apply(scenario, &mut self.fleet);
    }

    /// Apply a scenario given by name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HarnessError::Configuration`] for unknown names.
    pub fn apply_scenario_named(&mut self, name: &str) -> HarnessResult<()> {
        let scenario: Scenario = name.parse()?;
        self.apply_scenario(scenario);
        Ok(())
    }

    /// Toggle a service's failure override, independent of the scenario.
    ///
    /// `healthy = false` forces the service down until this is called again
    /// with `healthy = true`, which clears the override and lets the scenario
    /// preset show through.
    pub fn simulate_service_failure(&mut self, service: ServiceName, healthy: bool) {
        if healthy {
            self.fleet.clear_override(service);
        } else {
            self.fleet.force_failure(service);
        }
        info!(%service, healthy, "service override changed");
    }

    /// Reset the fleet to all-healthy and the batch size to its default.
    pub fn reset(&mut self) {
        self.fleet.reset();
        self.apply_scenario(Scenario::HealthySystem);
    }

    /// Check one service's health.
    pub async fn check_service(&self, service: ServiceName) -> ServiceResult {
        self.simulator.invoke(service, &self.fleet).await
    }

    /// Sweep every service once, in critical-path order.
    pub async fn check_all_services(&self) -> Vec<ServiceResult> {
        let mut results = Vec::with_capacity(ServiceName::ALL.len());
        for service in ServiceName::ALL {
            results.push(self.check_service(service).await);
        }
        results
    }

    /// Run the critical purchase path once.
    pub async fn run_critical_path(&self) -> PathResult {
        CriticalPathRunner::new(
            &self.simulator,
            &self.fleet,
            self.thresholds().max_response_time,
        )
        .run_critical_path()
        .await
    }

    /// Run `n` concurrent critical-path runs.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HarnessError::Validation`] when `n` is zero.
    pub async fn run_concurrent(&self, n: usize) -> HarnessResult<ConcurrencyResult> {
        ConcurrencyProbe::new(
            &self.simulator,
            &self.fleet,
            self.thresholds().max_response_time,
        )
        .run_concurrent(n)
        .await
    }

    /// Run the full availability test suite and reduce it to a report.
    ///
    /// Sweeps every service, runs the critical path, probes concurrent load
    /// with the scenario's batch size, and scores the lot.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HarnessError::Validation`] when the configured batch
    /// size is zero.
    pub async fn run_availability_tests(&self) -> HarnessResult<AvailabilityReport> {
        let services = self.check_all_services().await;
        let path = self.run_critical_path().await;
        let concurrency = self.run_concurrent(self.concurrency).await?;
        let score = self.calculator.compute(&services, &path, &concurrency);
        let issues = self.collect_issues(&services, &path, &concurrency);

        info!(
            score = score.overall_score,
            healthy = score.is_healthy,
            issues = issues.len(),
            "availability tests complete"
        );

        Ok(AvailabilityReport {
            score,
            services,
            path,
            concurrency,
            issues,
        })
    }

    fn collect_issues(
        &self,
        services: &[ServiceResult],
        path: &PathResult,
        concurrency: &ConcurrencyResult,
    ) -> Vec<String> {
        let mut issues = Vec::new();

        match &path.failure {
            None => {}
            Some(PathFailure::StepFailed(service)) => {
                issues.push(format!("critical path is not available: {service} failed"));
            }
            Some(PathFailure::Deadline { elapsed, budget }) => {
                issues.push(format!(
                    "critical path is not available: {:.3}s exceeds the {:.3}s budget",
                    elapsed.as_secs_f64(),
                    budget.as_secs_f64()
                ));
            }
        }

        let min_rate = self.thresholds().min_concurrency_success_rate();
        if concurrency.success_rate < min_rate {
            issues.push(format!(
                "concurrent success rate too low: {:.1}%",
                concurrency.success_rate * 100.0
            ));
        }

        for result in services {
            if let Some(error) = &result.error {
                issues.push(format!("{} is unhealthy: {error}", result.service));
            } else if result.is_slow(self.thresholds().max_response_time) {
                issues.push(format!(
                    "{} is too slow: {:.3}s",
                    result.service,
                    result.response_time.as_secs_f64()
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarnessError;

    #[tokio::test]
    async fn healthy_harness_scores_100() {
        let harness = AvailabilityHarness::seeded(1);
        let report = harness.run_availability_tests().await.expect("run");
        assert_eq!(report.score.overall_score, 100.0);
        assert!(report.score.is_healthy);
        assert!(report.issues.is_empty());
    }

    #[tokio::test]
    async fn named_scenario_round_trips() {
        let mut harness = AvailabilityHarness::seeded(2);
        harness
            .apply_scenario_named("critical_failure")
            .expect("known scenario");
        let err = harness
            .apply_scenario_named("nonsense")
            .expect_err("must be rejected");
        assert!(matches!(err, HarnessError::Configuration(_)));
    }

    #[tokio::test]
    async fn invalid_thresholds_are_rejected_up_front() {
        let thresholds = FitnessThresholds {
            max_failure_rate: 2.0,
            ..FitnessThresholds::default()
        };
        let result = AvailabilityHarness::with_thresholds(SimProviders::new(3), thresholds);
        assert!(matches!(result, Err(HarnessError::Validation(_))));
    }

    #[tokio::test]
    async fn reset_clears_injected_failures() {
        let mut harness = AvailabilityHarness::seeded(4);
        harness.simulate_service_failure(ServiceName::Payment, false);
        harness.apply_scenario(Scenario::HighLoad);
        harness.reset();

        let report = harness.run_availability_tests().await.expect("run");
        assert!(report.score.is_healthy);
        assert_eq!(harness.concurrency(), crate::scenario::DEFAULT_CONCURRENCY);
    }
}
