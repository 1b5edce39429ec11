//! # Group-Buy Fitness
//!
//! Availability fitness harness for a simulated group-buying platform.
//! Seven mocked backend services (cart, product, participant-check, order,
//! payment, logistics, notification) are exercised three ways: an individual
//! health sweep, the fixed critical purchase path, and a concurrent load
//! probe. The results reduce to a single 0-100 availability score.
//!
//! Everything is simulated: no network calls, no persistence. Timing and
//! randomness are injected through provider traits, so the same harness code
//! runs deterministically under a seed or with real pacing in the demo
//! binary.
//!
//! ## Core Components
//!
//! - [`ServiceSimulator`]: synthesizes per-service health/latency results
//! - [`CriticalPathRunner`]: sequences the seven-step purchase flow,
//!   short-circuiting at the first failure
//! - [`ConcurrencyProbe`]: N independent path runs, success rate + throughput
//! - [`ScoreCalculator`]: penalty-table reduction to a [`FitnessScore`]
//! - [`ScenarioConfigurator`]: named presets (healthy, degraded,
//!   critical-failure, high-load)
//! - [`AvailabilityHarness`]: composes the above into
//!   `run_availability_tests`
//!
//! ## Quick Start
//!
//! ```ignore
//! use groupbuy_fitness::{AvailabilityHarness, Scenario};
//!
//! let mut harness = AvailabilityHarness::seeded(42);
//! harness.apply_scenario(Scenario::CriticalFailure);
//! let report = harness.run_availability_tests().await?;
//! assert!(!report.score.is_healthy);
//! ```
//!
//! Failed services and blown deadlines are *data* (`succeeded = false`), not
//! errors; [`HarnessError`] covers usage mistakes only (unknown names,
//! invalid probe counts, out-of-range thresholds).

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

mod duration_secs;

/// Threshold configuration and environment overrides.
pub mod config;

/// Usage-error types.
pub mod error;

/// The availability harness composing all components.
pub mod harness;

/// Critical-path execution.
pub mod path;

/// Concurrent load probing.
pub mod probe;

/// Injectable clock and randomness providers.
pub mod providers;

/// The availability report.
pub mod report;

/// Named scenario presets.
pub mod scenario;

/// Availability scoring.
pub mod score;

/// The mocked service fleet.
pub mod service;

pub use config::{ALERT_THRESHOLD_ENV, FitnessThresholds};
pub use error::{HarnessError, HarnessResult};
pub use harness::AvailabilityHarness;
pub use path::{CriticalPathRunner, PathFailure, PathResult};
pub use probe::{ConcurrencyProbe, ConcurrencyResult};
pub use providers::{
    Clock, Providers, RandomProvider, SimClock, SimProviders, SimRandomProvider,
    ThreadRandomProvider, TokioClock, TokioProviders,
};
pub use report::AvailabilityReport;
pub use scenario::{DEFAULT_CONCURRENCY, HIGH_LOAD_CONCURRENCY, Scenario, ScenarioConfigurator};
pub use score::{FitnessScore, Penalty, ScoreCalculator};
pub use service::{
    CRITICAL_PATH, CriticalStep, LatencyProfile, ServiceFleet, ServiceName, ServiceResult,
    ServiceSimulator, ServiceState,
};
