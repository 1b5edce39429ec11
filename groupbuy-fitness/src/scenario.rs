//! Named scenario presets.
//!
//! Scenarios are a closed set; unknown names fail with a configuration error
//! instead of silently no-opping. Applying a scenario rewrites every preset,
//! so repeated applications are idempotent.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::error::HarnessError;
use crate::service::{ServiceFleet, ServiceName, ServiceState};

/// Default number of concurrent critical-path runs per probe batch.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Elevated batch size used by the high-load scenario.
pub const HIGH_LOAD_CONCURRENCY: usize = 20;

/// Named preset of service states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Every service healthy.
    HealthySystem,
    /// Payment and logistics respond over the threshold.
    DegradedSystem,
    /// Payment is down; the critical path cannot complete.
    CriticalFailure,
    /// No state change; the probe runs an elevated batch.
    HighLoad,
}

impl Scenario {
    /// All recognized scenarios.
    pub const ALL: [Scenario; 4] = [
        Scenario::HealthySystem,
        Scenario::DegradedSystem,
        Scenario::CriticalFailure,
        Scenario::HighLoad,
    ];

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::HealthySystem => "healthy_system",
            Scenario::DegradedSystem => "degraded_system",
            Scenario::CriticalFailure => "critical_failure",
            Scenario::HighLoad => "high_load",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.as_str() == s)
            .ok_or_else(|| HarnessError::Configuration(format!("unknown scenario '{s}'")))
    }
}

/// Applies scenario presets to a fleet.
#[derive(Debug, Clone)]
pub struct ScenarioConfigurator {
    default_concurrency: usize,
    high_load_concurrency: usize,
}

impl Default for ScenarioConfigurator {
    fn default() -> Self {
        Self {
            default_concurrency: DEFAULT_CONCURRENCY,
            high_load_concurrency: HIGH_LOAD_CONCURRENCY,
        }
    }
}

impl ScenarioConfigurator {
    /// Create a configurator with explicit batch sizes.
    pub fn new(default_concurrency: usize, high_load_concurrency: usize) -> Self {
        Self {
            default_concurrency,
            high_load_concurrency,
        }
    }

    /// Apply a scenario's presets and return the probe batch size to use.
    ///
    /// Presets are rewritten wholesale; failure overrides injected via
    /// `simulate_service_failure` are left in place.
    pub fn apply(&self, scenario: Scenario, fleet: &mut ServiceFleet) -> usize {
        match scenario {
            Scenario::HealthySystem => {
                for name in ServiceName::ALL {
                    fleet.set_preset(name, ServiceState::Healthy);
                }
            }
            Scenario::DegradedSystem => {
                for name in ServiceName::ALL {
                    fleet.set_preset(name, ServiceState::Healthy);
                }
                fleet.set_preset(ServiceName::Payment, ServiceState::Degraded);
                fleet.set_preset(ServiceName::Logistics, ServiceState::Degraded);
            }
            Scenario::CriticalFailure => {
                for name in ServiceName::ALL {
                    fleet.set_preset(name, ServiceState::Healthy);
                }
                fleet.set_preset(ServiceName::Payment, ServiceState::Failed);
            }
            Scenario::HighLoad => {}
        }

        let concurrency = match scenario {
            Scenario::HighLoad => self.high_load_concurrency,
            _ => self.default_concurrency,
        };
        info!(%scenario, concurrency, "scenario applied");
        concurrency
    }
}
