//! Time sources for the timing engine.
//!
//! The engine samples time through the [`Clock`] trait so that interval math
//! stays on a monotonic source and tests can drive time by hand.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
}

/// Monotonic system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can hold one handle while
/// the engine owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Arc<Mutex<ManualClockState>>,
}

#[derive(Debug)]
struct ManualClockState {
    base: Instant,
    offset: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ManualClockState {
                base: Instant::now(),
                offset: Duration::ZERO,
            })),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut state = self.inner.lock().unwrap();
        state.offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let state = self.inner.lock().unwrap();
        state.base + state.offset
    }
}
