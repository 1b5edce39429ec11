//! The mocked service fleet.

mod name;
mod simulator;
mod state;

pub use name::{CRITICAL_PATH, CriticalStep, ServiceName};
pub use simulator::{LatencyProfile, ServiceResult, ServiceSimulator};
pub use state::{ServiceFleet, ServiceState};
