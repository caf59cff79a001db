//! One-shot alarm scheduling against the host loop.
//!
//! The session controller asks a [`Scheduler`] for a callback after a delay;
//! the host loop polls [`AlarmQueue::pop_due`] each tick and delivers due
//! alarm ids back as events. The timing engine never touches this module.

use std::time::{Duration, Instant};

/// Opaque handle for a scheduled alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlarmId(pub u64);

pub trait Scheduler {
    fn schedule_after(&mut self, now: Instant, delay: Duration) -> AlarmId;
}

/// Polled alarm queue for a single-threaded host loop.
#[derive(Debug, Default)]
pub struct AlarmQueue {
    next_id: u64,
    pending: Vec<(Instant, AlarmId)>,
}

impl AlarmQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the earliest alarm whose deadline has passed.
    pub fn pop_due(&mut self, now: Instant) -> Option<AlarmId> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (deadline, _))| *deadline <= now)
            .min_by_key(|(_, (deadline, _))| *deadline)
            .map(|(index, _)| index)?;
        Some(self.pending.swap_remove(index).1)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Scheduler for AlarmQueue {
    fn schedule_after(&mut self, now: Instant, delay: Duration) -> AlarmId {
        self.next_id += 1;
        let id = AlarmId(self.next_id);
        self.pending.push((now + delay, id));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alarm_fires_only_after_its_deadline() {
        let mut queue = AlarmQueue::new();
        let now = Instant::now();
        let id = queue.schedule_after(now, Duration::from_secs(2));

        assert_eq!(queue.pop_due(now), None);
        assert_eq!(queue.pop_due(now + Duration::from_secs(1)), None);
        assert_eq!(queue.pop_due(now + Duration::from_secs(2)), Some(id));
        assert_eq!(queue.pop_due(now + Duration::from_secs(2)), None);
    }

    #[test]
    fn earliest_deadline_pops_first() {
        let mut queue = AlarmQueue::new();
        let now = Instant::now();
        let late = queue.schedule_after(now, Duration::from_secs(3));
        let early = queue.schedule_after(now, Duration::from_secs(1));

        let later = now + Duration::from_secs(5);
        assert_eq!(queue.pop_due(later), Some(early));
        assert_eq!(queue.pop_due(later), Some(late));
        assert_eq!(queue.pop_due(later), None);
    }

    #[test]
    fn alarm_ids_are_unique() {
        let mut queue = AlarmQueue::new();
        let now = Instant::now();
        let a = queue.schedule_after(now, Duration::ZERO);
        let b = queue.schedule_after(now, Duration::ZERO);
        assert_ne!(a, b);
        assert_eq!(queue.pending(), 2);
    }
}
