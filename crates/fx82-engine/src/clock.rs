//! Clocks for firing deferred effects
//!
//! [`ManualClock`] only moves when told to, which makes timer-driven
//! behavior (error auto-clear, indicator expiry) deterministic in tests.
//! [`SystemClock`] follows a monotonic wall clock for interactive hosts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of elapsed time since some fixed origin
pub trait Clock {
    /// Elapsed time since the clock's origin
    fn now(&self) -> Duration;
}

/// Clock advanced by hand
///
/// Clones share the same time, so a test can keep a handle while an
/// [`EffectQueue`](crate::effects::EffectQueue) owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    current_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock at time zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in milliseconds
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.current_ms.load(Ordering::SeqCst)
    }

    /// Fast-forward time by duration
    pub fn advance(&self, duration: Duration) {
        self.current_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }

    /// Fast-forward time by milliseconds
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms())
    }
}

/// Monotonic clock starting when constructed
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
