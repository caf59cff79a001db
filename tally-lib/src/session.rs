//! Session controller: wires user intent to the timing engine.
//!
//! A [`Session`] owns one [`UpCountingTimer`] plus the commit lockout. When
//! the user commits the current task the clock is stopped and the session
//! enters [`SessionState::AwaitingReset`] for a grace window, during which
//! further commits (and pause/resume toggles) are ignored. When the grace
//! alarm fires the engine is reset and the finished task, with its audit
//! trail, is handed back as a [`CompletedTask`].

use std::time::Duration;

use log::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::sched::{AlarmId, Scheduler};
use crate::timer::{TimerEvent, UpCountingTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingReset,
}

/// A finished task: its name, total elapsed time, and event trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedTask {
    pub name: String,
    pub total: Duration,
    pub events: Vec<TimerEvent>,
}

pub struct Session<C: Clock = SystemClock> {
    clock: C,
    timer: UpCountingTimer<C>,
    state: SessionState,
    grace: Duration,
    pending: Option<(AlarmId, String)>,
}

impl Session<SystemClock> {
    pub fn new(grace: Duration) -> Self {
        Self::with_clock(SystemClock, grace)
    }
}

impl<C: Clock + Clone> Session<C> {
    pub fn with_clock(clock: C, grace: Duration) -> Self {
        let timer = UpCountingTimer::with_clock(clock.clone());
        Self {
            clock,
            timer,
            state: SessionState::Idle,
            grace,
            pending: None,
        }
    }
}

impl<C: Clock> Session<C> {
    /// Start the clock for a newly named task.
    pub fn begin(&mut self) {
        info!("task started");
        self.timer.start();
    }

    /// Pause or resume the clock. Ignored during the commit lockout.
    pub fn toggle_timer(&mut self) {
        if self.state == SessionState::AwaitingReset {
            debug!("toggle ignored during commit lockout");
            return;
        }
        self.timer.toggle();
    }

    /// Commit the current task and schedule the grace alarm.
    ///
    /// Returns `false` when a commit is already in flight. Committing stops
    /// the clock if it is running; the lockout is independent state, so a
    /// commit never restarts a paused clock.
    pub fn commit(&mut self, name: &str, scheduler: &mut dyn Scheduler) -> bool {
        if self.state == SessionState::AwaitingReset {
            debug!("commit ignored: already awaiting reset");
            return false;
        }
        if self.timer.is_running() {
            let _ = self.timer.pause();
        }
        let id = scheduler.schedule_after(self.clock.now(), self.grace);
        self.pending = Some((id, name.to_string()));
        self.state = SessionState::AwaitingReset;
        info!("task '{}' committed, input locked for {:?}", name, self.grace);
        true
    }

    /// Handle a fired alarm; only the pending grace alarm has any effect.
    ///
    /// On a match the engine is reset and the completed task is returned,
    /// audit trail included.
    pub fn on_alarm(&mut self, id: AlarmId) -> Option<CompletedTask> {
        let (pending_id, name) = self.pending.take()?;
        if pending_id != id {
            self.pending = Some((pending_id, name));
            return None;
        }
        let total = self.timer.current();
        let events = self.timer.reset();
        self.state = SessionState::Idle;
        info!("task '{}' finished after {:?}", name, total);
        Some(CompletedTask { name, total, events })
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.current()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::time::Instant;

    struct FakeScheduler {
        next_id: u64,
        delays: Vec<Duration>,
    }

    impl FakeScheduler {
        fn new() -> Self {
            Self { next_id: 0, delays: Vec::new() }
        }
    }

    impl Scheduler for FakeScheduler {
        fn schedule_after(&mut self, _now: Instant, delay: Duration) -> AlarmId {
            self.next_id += 1;
            self.delays.push(delay);
            AlarmId(self.next_id)
        }
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn session() -> (ManualClock, Session<ManualClock>) {
        let clock = ManualClock::new();
        let session = Session::with_clock(clock.clone(), secs(2));
        (clock, session)
    }

    #[test]
    fn commit_stops_the_clock_and_locks_the_session() {
        let (clock, mut session) = session();
        let mut scheduler = FakeScheduler::new();

        session.begin();
        clock.advance(secs(5));
        assert!(session.commit("write report", &mut scheduler));

        assert!(!session.is_running());
        assert_eq!(session.state(), SessionState::AwaitingReset);
        assert_eq!(session.elapsed(), secs(5));
        assert_eq!(scheduler.delays, vec![secs(2)]);
    }

    #[test]
    fn commit_does_not_restart_a_paused_clock() {
        let (clock, mut session) = session();
        let mut scheduler = FakeScheduler::new();

        session.begin();
        clock.advance(secs(3));
        session.toggle_timer();
        clock.advance(secs(4));
        assert!(session.commit("reading", &mut scheduler));

        assert!(!session.is_running());
        assert_eq!(session.elapsed(), secs(3));
    }

    #[test]
    fn commits_during_lockout_are_ignored() {
        let (_clock, mut session) = session();
        let mut scheduler = FakeScheduler::new();

        session.begin();
        assert!(session.commit("one", &mut scheduler));
        assert!(!session.commit("two", &mut scheduler));
        assert_eq!(scheduler.delays.len(), 1);
    }

    #[test]
    fn toggles_during_lockout_are_ignored() {
        let (clock, mut session) = session();
        let mut scheduler = FakeScheduler::new();

        session.begin();
        clock.advance(secs(5));
        session.commit("task", &mut scheduler);
        session.toggle_timer();
        clock.advance(secs(5));
        assert!(!session.is_running());
        assert_eq!(session.elapsed(), secs(5));
    }

    #[test]
    fn grace_alarm_resets_and_hands_back_the_task() {
        let (clock, mut session) = session();
        let mut scheduler = FakeScheduler::new();

        session.begin();
        clock.advance(secs(8));
        session.commit("deep work", &mut scheduler);
        let id = AlarmId(1);

        let task = session.on_alarm(id).expect("pending alarm should fire");
        assert_eq!(task.name, "deep work");
        assert_eq!(task.total, secs(8));
        assert_eq!(task.events.len(), 2);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.elapsed(), Duration::ZERO);

        // A second delivery of the same id is stale.
        assert_eq!(session.on_alarm(id), None);
    }

    #[test]
    fn unrelated_alarms_do_not_reset_the_session() {
        let (_clock, mut session) = session();
        let mut scheduler = FakeScheduler::new();

        session.begin();
        session.commit("task", &mut scheduler);
        assert_eq!(session.on_alarm(AlarmId(99)), None);
        assert_eq!(session.state(), SessionState::AwaitingReset);

        // The real alarm still works afterwards.
        assert!(session.on_alarm(AlarmId(1)).is_some());
    }
}
