//! Service states and the fleet configuration object.
//!
//! The fleet replaces the original demo's process-wide mutable service map
//! with an explicit value owned by the harness and passed by reference into
//! each simulator call.

use std::collections::BTreeMap;

use serde::Serialize;

use super::name::ServiceName;

/// Simulated health state of one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceState {
    /// Fast responses, always succeeds.
    Healthy,
    /// Succeeds, but responses exceed the response-time threshold.
    Degraded,
    /// Requests fail outright.
    Failed,
}

/// Configured states for the whole service fleet.
///
/// Two layers: scenario *presets* and per-service failure *overrides*.
/// Overrides are set by `simulate_service_failure` and win over presets until
/// explicitly cleared; applying a scenario rewrites presets only, so an
/// injected failure survives scenario changes by design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFleet {
    presets: BTreeMap<ServiceName, ServiceState>,
    overrides: BTreeMap<ServiceName, ServiceState>,
}

impl ServiceFleet {
    /// Create a fleet with every service healthy.
    pub fn healthy() -> Self {
        Self {
            presets: ServiceName::ALL
                .into_iter()
                .map(|name| (name, ServiceState::Healthy))
                .collect(),
            overrides: BTreeMap::new(),
        }
    }

    /// Set one service's preset state.
    pub fn set_preset(&mut self, service: ServiceName, state: ServiceState) {
        self.presets.insert(service, state);
    }

    /// Force a service to fail regardless of its preset.
    pub fn force_failure(&mut self, service: ServiceName) {
        self.overrides.insert(service, ServiceState::Failed);
    }

    /// Clear a service's override; the preset shows through again.
    pub fn clear_override(&mut self, service: ServiceName) {
        self.overrides.remove(&service);
    }

    /// The state the simulator observes: override if present, else preset.
    pub fn effective_state(&self, service: ServiceName) -> ServiceState {
        self.overrides
            .get(&service)
            .or_else(|| self.presets.get(&service))
            .copied()
            .unwrap_or(ServiceState::Healthy)
    }

    /// Effective state of every service, in critical-path order.
    pub fn effective_states(&self) -> Vec<(ServiceName, ServiceState)> {
        ServiceName::ALL
            .into_iter()
            .map(|name| (name, self.effective_state(name)))
            .collect()
    }

    /// Reset everything: all presets healthy, all overrides cleared.
    pub fn reset(&mut self) {
        *self = Self::healthy();
    }
}

impl Default for ServiceFleet {
    fn default() -> Self {
        Self::healthy()
    }
}
