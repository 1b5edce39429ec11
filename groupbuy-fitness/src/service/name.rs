//! Service identity and the critical purchase path.
//!
//! Services are a closed enumeration rather than open string keys: an unknown
//! name fails at parse time with a configuration error instead of surfacing
//! mid-run.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::HarnessError;

/// The seven backend services of the group-buying platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceName {
    /// Group cart management.
    Cart,
    /// Product catalog.
    Product,
    /// Minimum-participant threshold checks.
    ParticipantCheck,
    /// Consolidated order generation.
    Order,
    /// Group payment processing.
    Payment,
    /// Logistics and distribution coordination.
    Logistics,
    /// Pickup/delivery notifications.
    Notification,
}

impl ServiceName {
    /// All services, in critical-path order.
    pub const ALL: [ServiceName; 7] = [
        ServiceName::Cart,
        ServiceName::Product,
        ServiceName::ParticipantCheck,
        ServiceName::Order,
        ServiceName::Payment,
        ServiceName::Logistics,
        ServiceName::Notification,
    ];

    /// Canonical kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceName::Cart => "cart",
            ServiceName::Product => "product",
            ServiceName::ParticipantCheck => "participant-check",
            ServiceName::Order => "order",
            ServiceName::Payment => "payment",
            ServiceName::Logistics => "logistics",
            ServiceName::Notification => "notification",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| HarnessError::Configuration(format!("unknown service '{s}'")))
    }
}

/// One step of the critical purchase path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriticalStep {
    /// Human-readable step label.
    pub label: &'static str,
    /// Service the step exercises.
    pub service: ServiceName,
}

/// The fixed ordered critical path a group purchase must complete.
pub const CRITICAL_PATH: [CriticalStep; 7] = [
    CriticalStep {
        label: "create-cart",
        service: ServiceName::Cart,
    },
    CriticalStep {
        label: "add-products",
        service: ServiceName::Product,
    },
    CriticalStep {
        label: "check-minimum-participants",
        service: ServiceName::ParticipantCheck,
    },
    CriticalStep {
        label: "generate-order",
        service: ServiceName::Order,
    },
    CriticalStep {
        label: "process-payment",
        service: ServiceName::Payment,
    },
    CriticalStep {
        label: "coordinate-logistics",
        service: ServiceName::Logistics,
    },
    CriticalStep {
        label: "send-notification",
        service: ServiceName::Notification,
    },
];
