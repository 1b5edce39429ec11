//! Mocked service invocation.
//!
//! Each invocation synthesizes a latency from the service's baseline profile
//! (or the degraded/failed behavior of its current state), waits on the
//! injected clock, and returns an immutable [`ServiceResult`]. No external
//! I/O happens anywhere in here.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::providers::{Clock, Providers, RandomProvider};

use super::name::ServiceName;
use super::state::{ServiceFleet, ServiceState};

/// Extra latency range added on top of the response-time threshold when a
/// service is degraded, in milliseconds.
const DEGRADED_EXTRA_MS: std::ops::Range<u64> = 200..1_500;

/// Latency range of a failed request (connection-refused style), in
/// milliseconds.
const FAILED_MS: std::ops::Range<u64> = 1..20;

/// Baseline latency range of one healthy service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyProfile {
    baseline_ms: std::ops::Range<u64>,
}

impl LatencyProfile {
    /// Create a profile from a baseline range in milliseconds.
    pub fn new(baseline_ms: std::ops::Range<u64>) -> Self {
        Self { baseline_ms }
    }

    /// Default baseline for a service. Payment is the slowest hop,
    /// participant checks the fastest; the healthy path total stays well
    /// under the 2-second path budget.
    pub fn for_service(service: ServiceName) -> Self {
        let baseline_ms = match service {
            ServiceName::Cart => 100..180,
            ServiceName::Product => 60..120,
            ServiceName::ParticipantCheck => 30..80,
            ServiceName::Order => 120..200,
            ServiceName::Payment => 180..300,
            ServiceName::Logistics => 150..250,
            ServiceName::Notification => 50..110,
        };
        Self { baseline_ms }
    }

    /// Baseline range in milliseconds.
    pub fn baseline_ms(&self) -> std::ops::Range<u64> {
        self.baseline_ms.clone()
    }
}

/// Outcome of one simulated service invocation. Created fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceResult {
    /// Service that was invoked.
    pub service: ServiceName,
    /// Whether the request succeeded.
    pub succeeded: bool,
    /// Synthesized response time.
    #[serde(serialize_with = "crate::duration_secs::serialize")]
    pub response_time: Duration,
    /// Failure reason when `succeeded` is false.
    pub error: Option<String>,
}

impl ServiceResult {
    /// Whether the response time exceeds the given threshold.
    pub fn is_slow(&self, threshold: Duration) -> bool {
        self.response_time > threshold
    }
}

/// Simulates the mocked backend services.
///
/// The simulator owns latency profiles and providers; the fleet configuration
/// is passed into each call so no hidden state leaks between runs.
pub struct ServiceSimulator<P: Providers> {
    providers: P,
    profiles: BTreeMap<ServiceName, LatencyProfile>,
    max_response_time: Duration,
}

impl<P: Providers> ServiceSimulator<P> {
    /// Create a simulator with default latency profiles.
    ///
    /// `max_response_time` is the per-service slowness threshold; degraded
    /// services synthesize latencies just above it.
    pub fn new(providers: P, max_response_time: Duration) -> Self {
        Self {
            providers,
            profiles: ServiceName::ALL
                .into_iter()
                .map(|name| (name, LatencyProfile::for_service(name)))
                .collect(),
            max_response_time,
        }
    }

    /// Replace the latency profile of one service.
    pub fn set_profile(&mut self, service: ServiceName, profile: LatencyProfile) {
        self.profiles.insert(service, profile);
    }

    /// The providers bundle backing this simulator.
    pub fn providers(&self) -> &P {
        &self.providers
    }

    /// Derive a simulator with an independent random stream.
    ///
    /// Used by the concurrency probe so parallel runs cannot perturb each
    /// other's sampling.
    pub fn fork(&self) -> Self {
        Self {
            providers: self.providers.fork(),
            profiles: self.profiles.clone(),
            max_response_time: self.max_response_time,
        }
    }

    /// Invoke one service and produce its synthetic result.
    pub async fn invoke(&self, service: ServiceName, fleet: &ServiceFleet) -> ServiceResult {
        let state = fleet.effective_state(service);
        let random = self.providers.random();

        let (succeeded, response_time, error) = match state {
            ServiceState::Healthy => {
                let profile = &self.profiles[&service];
                let ms = random.random_range(profile.baseline_ms());
                (true, Duration::from_millis(ms), None)
            }
            ServiceState::Degraded => {
                let extra = random.random_range(DEGRADED_EXTRA_MS);
                let latency = self.max_response_time + Duration::from_millis(extra);
                (true, latency, None)
            }
            ServiceState::Failed => {
                let ms = random.random_range(FAILED_MS);
                (
                    false,
                    Duration::from_millis(ms),
                    Some(format!("{service} is unavailable")),
                )
            }
        };

        self.providers.clock().sleep(response_time).await;
        debug!(%service, ?state, ?response_time, succeeded, "service invoked");

        ServiceResult {
            service,
            succeeded,
            response_time,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::SimProviders;

    const THRESHOLD: Duration = Duration::from_secs(2);

    fn simulator(seed: u64) -> ServiceSimulator<SimProviders> {
        ServiceSimulator::new(SimProviders::new(seed), THRESHOLD)
    }

    #[tokio::test]
    async fn healthy_service_stays_within_its_baseline() {
        let sim = simulator(1);
        let fleet = ServiceFleet::healthy();
        for _ in 0..32 {
            let result = sim.invoke(ServiceName::Payment, &fleet).await;
            assert!(result.succeeded);
            assert!(result.error.is_none());
            let ms = result.response_time.as_millis() as u64;
            assert!((180..300).contains(&ms), "unexpected latency {ms}ms");
            assert!(!result.is_slow(THRESHOLD));
        }
    }

    #[tokio::test]
    async fn degraded_service_exceeds_the_threshold_but_succeeds() {
        let sim = simulator(2);
        let mut fleet = ServiceFleet::healthy();
        fleet.set_preset(ServiceName::Logistics, ServiceState::Degraded);

        let result = sim.invoke(ServiceName::Logistics, &fleet).await;
        assert!(result.succeeded);
        assert!(result.is_slow(THRESHOLD));
    }

    #[tokio::test]
    async fn failed_service_reports_an_error() {
        let sim = simulator(3);
        let mut fleet = ServiceFleet::healthy();
        fleet.force_failure(ServiceName::Payment);

        let result = sim.invoke(ServiceName::Payment, &fleet).await;
        assert!(!result.succeeded);
        assert_eq!(result.error.as_deref(), Some("payment is unavailable"));
        assert!(result.response_time < Duration::from_millis(20));
    }

    #[tokio::test]
    async fn invocation_advances_the_clock() {
        let sim = simulator(4);
        let fleet = ServiceFleet::healthy();
        let result = sim.invoke(ServiceName::Cart, &fleet).await;
        assert_eq!(sim.providers().clock().now(), result.response_time);
    }

    #[tokio::test]
    async fn same_seed_same_latencies() {
        let fleet = ServiceFleet::healthy();
        let a = simulator(9).invoke(ServiceName::Order, &fleet).await;
        let b = simulator(9).invoke(ServiceName::Order, &fleet).await;
        assert_eq!(a, b);
    }
}
