//! Provider implementations for the harness.
//!
//! Timing and randomness are injected rather than ambient, so deterministic
//! and real-time runs share identical harness code.

mod bundle;
mod clock;
mod random;

pub use bundle::{Providers, SimProviders, TokioProviders};
pub use clock::{Clock, SimClock, TokioClock};
pub use random::{RandomProvider, SimRandomProvider, ThreadRandomProvider};
