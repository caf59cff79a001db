//! The up-counting time-accounting engine.
//!
//! [`UpCountingTimer`] accumulates elapsed running time across repeated
//! start/pause cycles and keeps an append-only audit trail of the start and
//! pause events for the current task session. Settled time lives in
//! `accumulated`; the open interval, if any, is tracked by `running_since`,
//! so reading the current elapsed time is O(1) regardless of how many
//! intervals the record holds.

use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

use log::warn;
use serde::Serialize;

use crate::clock::{Clock, SystemClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Start,
    Pause,
}

/// One entry in the audit trail.
///
/// `at` is the monotonic offset from the session epoch, which is stamped at
/// construction and re-stamped on every [`UpCountingTimer::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerEvent {
    pub kind: EventKind,
    pub at: Duration,
}

/// Error returned by [`UpCountingTimer::pause`] when the timer is not running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotRunningError;

impl Display for NotRunningError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer not running")
    }
}

impl std::error::Error for NotRunningError {}

#[derive(Debug, Clone)]
pub struct UpCountingTimer<C: Clock = SystemClock> {
    clock: C,
    epoch: Instant,
    accumulated: Duration,
    running_since: Option<Instant>,
    record: Vec<TimerEvent>,
}

impl UpCountingTimer<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for UpCountingTimer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> UpCountingTimer<C> {
    pub fn with_clock(clock: C) -> Self {
        let epoch = clock.now();
        Self {
            clock,
            epoch,
            accumulated: Duration::ZERO,
            running_since: None,
            record: Vec::new(),
        }
    }

    /// Open a running interval and log a start event.
    ///
    /// Calling while already running is a no-op: re-stamping the open
    /// interval would silently discard its elapsed time, and folding it in
    /// without a pause event would break the record's alternation.
    pub fn start(&mut self) {
        if self.running_since.is_some() {
            warn!("start ignored: timer already running");
            return;
        }
        let now = self.clock.now();
        self.running_since = Some(now);
        self.record.push(TimerEvent {
            kind: EventKind::Start,
            at: now - self.epoch,
        });
    }

    /// Close the open interval, folding it into the accumulated total.
    ///
    /// Fails with [`NotRunningError`] when no interval is open; the failed
    /// call leaves all state untouched.
    pub fn pause(&mut self) -> Result<(), NotRunningError> {
        let started = self.running_since.ok_or(NotRunningError)?;
        let now = self.clock.now();
        self.record.push(TimerEvent {
            kind: EventKind::Pause,
            at: now - self.epoch,
        });
        self.accumulated += now - started;
        self.running_since = None;
        Ok(())
    }

    /// Start when paused, pause when running. Never fails.
    pub fn toggle(&mut self) {
        if self.running_since.is_some() {
            // The running check was just made, so pause cannot fail.
            let _ = self.pause();
        } else {
            self.start();
        }
    }

    /// Current elapsed time: the settled total plus the open interval.
    pub fn current(&self) -> Duration {
        match self.running_since {
            Some(started) => self.accumulated + (self.clock.now() - started),
            None => self.accumulated,
        }
    }

    /// Hand back the audit trail and return to the fresh-session baseline.
    ///
    /// The epoch is re-stamped, so the next session's events are offset from
    /// the moment of reset.
    pub fn reset(&mut self) -> Vec<TimerEvent> {
        self.accumulated = Duration::ZERO;
        self.running_since = None;
        self.epoch = self.clock.now();
        std::mem::take(&mut self.record)
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn record(&self) -> &[TimerEvent] {
        &self.record
    }
}
