//! End-to-end scenario properties of the availability harness.

use groupbuy_fitness::{
    AvailabilityHarness, FitnessThresholds, HarnessError, PathFailure, Penalty, Scenario,
    ServiceName, ServiceState,
};

#[tokio::test]
async fn healthy_system_scores_a_perfect_100() {
    let mut harness = AvailabilityHarness::seeded(1);
    harness.apply_scenario(Scenario::HealthySystem);

    let report = harness.run_availability_tests().await.expect("run");

    assert_eq!(report.score.overall_score, 100.0);
    assert!(report.score.is_healthy);
    assert!(report.score.breakdown.is_empty());
    assert!(report.path.succeeded);
    assert_eq!(report.concurrency.succeeded, report.concurrency.attempted);
    assert!(report.issues.is_empty());
}

#[tokio::test]
async fn injected_failure_stops_the_path_at_that_service() {
    let mut harness = AvailabilityHarness::seeded(2);
    harness.simulate_service_failure(ServiceName::Logistics, false);

    let path = harness.run_critical_path().await;

    assert!(!path.succeeded);
    assert_eq!(path.failed_at_step(), Some(ServiceName::Logistics));
    // Notification comes after logistics and must never have been attempted.
    assert!(
        path.step_results
            .iter()
            .all(|r| r.service != ServiceName::Notification)
    );

    // Clearing the override restores the path.
    harness.simulate_service_failure(ServiceName::Logistics, true);
    let path = harness.run_critical_path().await;
    assert!(path.succeeded);
}

#[tokio::test]
async fn critical_failure_drops_the_score_by_at_least_30() {
    let mut healthy = AvailabilityHarness::seeded(3);
    healthy.apply_scenario(Scenario::HealthySystem);
    let healthy_score = healthy
        .run_availability_tests()
        .await
        .expect("run")
        .score
        .overall_score;

    let mut harness = AvailabilityHarness::seeded(3);
    harness.apply_scenario(Scenario::CriticalFailure);
    let report = harness.run_availability_tests().await.expect("run");

    assert_eq!(report.path.failed_at_step(), Some(ServiceName::Payment));
    assert!(healthy_score - report.score.overall_score >= 30.0);
    assert!(!report.score.is_healthy);
    assert_eq!(report.score.breakdown[&Penalty::CriticalPathFailure], 30.0);
    assert!(
        report
            .issues
            .iter()
            .any(|issue| issue.contains("critical path is not available"))
    );
}

#[tokio::test]
async fn degraded_system_blows_the_deadline_and_collects_slow_penalties() {
    let mut harness = AvailabilityHarness::seeded(4);
    harness.apply_scenario(Scenario::DegradedSystem);

    let report = harness.run_availability_tests().await.expect("run");

    // Both degraded services succeed, but over the threshold.
    for service in [ServiceName::Payment, ServiceName::Logistics] {
        let result = report
            .services
            .iter()
            .find(|r| r.service == service)
            .expect("service swept");
        assert!(result.succeeded);
        assert!(result.response_time > harness.thresholds().max_response_time);
    }

    assert!(matches!(
        report.path.failure,
        Some(PathFailure::Deadline { .. })
    ));
    assert_eq!(report.score.breakdown[&Penalty::SlowServices], 10.0);
    assert!(report.score.overall_score < 100.0);
    assert!(!report.issues.is_empty());
}

#[tokio::test]
async fn high_load_raises_the_batch_without_touching_the_fleet() {
    let mut harness = AvailabilityHarness::seeded(5);
    harness.apply_scenario(Scenario::HighLoad);

    assert_eq!(
        harness.concurrency(),
        groupbuy_fitness::HIGH_LOAD_CONCURRENCY
    );
    for name in ServiceName::ALL {
        assert_eq!(
            harness.fleet().effective_state(name),
            ServiceState::Healthy
        );
    }

    let report = harness.run_availability_tests().await.expect("run");
    assert_eq!(
        report.concurrency.attempted,
        groupbuy_fitness::HIGH_LOAD_CONCURRENCY
    );
    assert!(report.score.is_healthy);
}

#[tokio::test]
async fn zero_concurrent_requests_is_a_validation_error() {
    let harness = AvailabilityHarness::seeded(6);
    let err = harness.run_concurrent(0).await.unwrap_err();
    assert!(matches!(err, HarnessError::Validation(_)));
}

#[tokio::test]
async fn single_concurrent_run_agrees_with_a_direct_path_run() {
    // Healthy: both succeed.
    let harness = AvailabilityHarness::seeded(7);
    let batch = harness.run_concurrent(1).await.expect("batch");
    let path = harness.run_critical_path().await;
    assert_eq!(batch.succeeded == 1, path.succeeded);

    // Payment down: both fail.
    let mut harness = AvailabilityHarness::seeded(8);
    harness.simulate_service_failure(ServiceName::Payment, false);
    let batch = harness.run_concurrent(1).await.expect("batch");
    let path = harness.run_critical_path().await;
    assert_eq!(batch.succeeded, 0);
    assert!(!path.succeeded);
}

#[tokio::test]
async fn applying_a_scenario_twice_matches_applying_it_once() {
    let mut once = AvailabilityHarness::seeded(9);
    once.apply_scenario(Scenario::DegradedSystem);

    let mut twice = AvailabilityHarness::seeded(9);
    twice.apply_scenario(Scenario::DegradedSystem);
    twice.apply_scenario(Scenario::DegradedSystem);

    assert_eq!(
        once.fleet().effective_states(),
        twice.fleet().effective_states()
    );
    assert_eq!(once.concurrency(), twice.concurrency());
}

#[tokio::test]
async fn injected_failures_survive_scenario_changes_until_cleared() {
    let mut harness = AvailabilityHarness::seeded(10);
    harness.simulate_service_failure(ServiceName::Cart, false);
    harness.apply_scenario(Scenario::HealthySystem);

    assert_eq!(
        harness.fleet().effective_state(ServiceName::Cart),
        ServiceState::Failed
    );

    harness.simulate_service_failure(ServiceName::Cart, true);
    assert_eq!(
        harness.fleet().effective_state(ServiceName::Cart),
        ServiceState::Healthy
    );
}

#[tokio::test]
async fn seeded_runs_are_fully_reproducible() {
    let mut a = AvailabilityHarness::seeded(42);
    a.apply_scenario(Scenario::DegradedSystem);
    let report_a = a.run_availability_tests().await.expect("run");

    let mut b = AvailabilityHarness::seeded(42);
    b.apply_scenario(Scenario::DegradedSystem);
    let report_b = b.run_availability_tests().await.expect("run");

    assert_eq!(report_a, report_b);
}

#[tokio::test]
async fn unknown_names_fail_fast() {
    let mut harness = AvailabilityHarness::seeded(11);
    assert!(matches!(
        harness.apply_scenario_named("thundering_herd"),
        Err(HarnessError::Configuration(_))
    ));
    assert!(matches!(
        "warehouse".parse::<ServiceName>(),
        Err(HarnessError::Configuration(_))
    ));
}

#[test]
fn alert_threshold_env_overrides_the_minimum() {
    std::env::set_var(groupbuy_fitness::ALERT_THRESHOLD_ENV, "70");
    let thresholds = FitnessThresholds::from_env().expect("override");
    assert_eq!(thresholds.min_availability_score, 70.0);

    std::env::set_var(groupbuy_fitness::ALERT_THRESHOLD_ENV, "not-a-number");
    assert!(matches!(
        FitnessThresholds::from_env(),
        Err(HarnessError::Validation(_))
    ));

    std::env::remove_var(groupbuy_fitness::ALERT_THRESHOLD_ENV);
}

#[tokio::test]
async fn report_serializes_to_json() {
    let mut harness = AvailabilityHarness::seeded(12);
    harness.apply_scenario(Scenario::CriticalFailure);
    let report = harness.run_availability_tests().await.expect("run");

    let value = serde_json::to_value(&report).expect("serialize");
    let score = value["score"]["overall_score"].as_f64().expect("score");
    assert!((0.0..=100.0).contains(&score));
    assert_eq!(value["score"]["is_healthy"], false);
    assert!(value["services"].as_array().expect("services").len() == 7);
}
