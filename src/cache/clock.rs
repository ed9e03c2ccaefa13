//! Clock Module
//!
//! Injectable time source used for all expiration decisions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

// == Clock Trait ==
/// Source of "current time" in milliseconds since the Unix epoch.
///
/// The cache never reads the system clock directly; it always goes through
/// this trait, so tests can substitute a controllable implementation and
/// drive expiration deterministically.
pub trait Clock: Send + Sync {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

// == System Clock ==
/// Production clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        // timestamp_millis is negative only for pre-epoch dates
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

// == Mock Clock ==
/// Controllable clock for tests.
///
/// Starts at zero (or a chosen instant) and only moves when [`advance`] is
/// called. Clones share the same underlying instant, so a clone handed to a
/// cache observes every advance made through the original handle.
///
/// [`advance`]: MockClock::advance
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now: Arc<AtomicU64>,
}

impl MockClock {
    /// Creates a clock frozen at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock frozen at the given instant.
    pub fn starting_at(millis: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(millis)),
        }
    }

    /// Moves the clock forward by the given duration.
    pub fn advance(&self, delta: Duration) {
        self.now
            .fetch_add(delta.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
