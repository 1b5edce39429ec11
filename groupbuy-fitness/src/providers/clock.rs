//! Clock provider abstraction.
//!
//! Simulated service latencies flow through [`Clock::sleep`], so the whole
//! harness can run on logical time ([`SimClock`], instant and deterministic)
//! or on real time ([`TokioClock`], the demo pacing).

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

/// Provider trait for time.
///
/// `now` reports the elapsed time since the clock was created. Clones share
/// the same timeline.
#[async_trait(?Send)]
pub trait Clock: Clone + 'static {
    /// Wait for the given duration.
    async fn sleep(&self, duration: Duration);

    /// Elapsed time since this clock (or any of its clones) was created.
    fn now(&self) -> Duration;
}

/// Logical clock for deterministic simulation.
///
/// `sleep` advances the shared timeline immediately without yielding to the
/// runtime, so a full availability run completes in microseconds while still
/// accounting time exactly.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now: Rc<Cell<Duration>>,
}

impl SimClock {
    /// Create a new logical clock starting at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl Clock for SimClock {
    async fn sleep(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }

    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Real-time clock backed by the tokio timer.
#[derive(Clone, Debug)]
pub struct TokioClock {
    origin: std::time::Instant,
}

impl TokioClock {
    /// Create a new clock anchored at the current instant.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sim_clock_advances_without_waiting() {
        let clock = SimClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.sleep(Duration::from_secs(3)).await;
        assert_eq!(clock.now(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn sim_clock_clones_share_the_timeline() {
        let clock = SimClock::new();
        let other = clock.clone();
        other.sleep(Duration::from_millis(250)).await;
        assert_eq!(clock.now(), Duration::from_millis(250));
    }

    #[tokio::test]
    async fn tokio_clock_reports_elapsed_time() {
        let clock = TokioClock::new();
        clock.sleep(Duration::from_millis(5)).await;
        assert!(clock.now() >= Duration::from_millis(5));
    }
}
