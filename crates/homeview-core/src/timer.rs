//! Cancelable single-shot and recurring timers on a caller-driven clock.
//!
//! The queue never sleeps and owns no thread. The event loop feeds it the
//! current time and dispatches whatever became due, one timer at a time, so
//! every callback runs to completion before the next one fires.

use std::collections::{BTreeSet, HashMap};

use tracing::trace;

/// Which scroll container a tracker listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollChannel {
    /// The top-level panel stack
    Panels,
    /// The horizontal news card strip
    News,
}

/// What a timer is for; used to route it when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    AutoAdvance,
    ScrollSettle(ScrollChannel),
    IdleTimeout,
    LongPress,
    FeedbackHide,
    ClockTick,
}

/// Opaque handle returned when arming a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    /// Clock value at which it fired
    pub at_ms: u64,
}

#[derive(Debug, Clone)]
struct Entry {
    deadline_ms: u64,
    kind: TimerKind,
    period_ms: Option<u64>,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: u64,
    entries: HashMap<TimerHandle, Entry>,
    /// (deadline, handle) ordering; ties fire in arming order
    order: BTreeSet<(u64, TimerHandle)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value in milliseconds
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Arm a single-shot timer `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, kind: TimerKind) -> TimerHandle {
        self.insert(delay_ms, kind, None)
    }

    /// Arm a timer that fires every `period_ms` until cancelled
    pub fn schedule_repeating(&mut self, period_ms: u64, kind: TimerKind) -> TimerHandle {
        let period_ms = period_ms.max(1);
        self.insert(period_ms, kind, Some(period_ms))
    }

    fn insert(&mut self, delay_ms: u64, kind: TimerKind, period_ms: Option<u64>) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        let deadline_ms = self.now_ms.saturating_add(delay_ms);
        self.entries.insert(
            handle,
            Entry {
                deadline_ms,
                kind,
                period_ms,
            },
        );
        self.order.insert((deadline_ms, handle));
        trace!(?kind, ?handle, deadline_ms, "timer armed");
        handle
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.remove(&handle) {
            Some(entry) => {
                self.order.remove(&(entry.deadline_ms, handle));
                trace!(kind = ?entry.kind, ?handle, "timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel the timer held in `slot`, leaving the slot empty
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerHandle>) {
        if let Some(handle) = slot.take() {
            self.cancel(handle);
        }
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    /// Deadline of a pending timer
    pub fn deadline(&self, handle: TimerHandle) -> Option<u64> {
        self.entries.get(&handle).map(|e| e.deadline_ms)
    }

    /// Number of pending timers of one kind
    pub fn pending_count(&self, kind: TimerKind) -> usize {
        self.entries.values().filter(|e| e.kind == kind).count()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<u64> {
        self.order.iter().next().map(|(deadline, _)| *deadline)
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// The clock moves to the timer's deadline so anything armed from its
    /// callback is measured from the moment it fired. Recurring timers are
    /// re-armed under the same handle.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Fired> {
        let &(deadline_ms, handle) = self.order.iter().next()?;
        if deadline_ms > until_ms {
            return None;
        }
        self.order.remove(&(deadline_ms, handle));
        let entry = self.entries.remove(&handle)?;
        let kind = entry.kind;
        self.now_ms = self.now_ms.max(deadline_ms);

        if let Some(period_ms) = entry.period_ms {
            let next = deadline_ms.saturating_add(period_ms);
            self.entries.insert(
                handle,
                Entry {
                    deadline_ms: next,
                    ..entry
                },
            );
            self.order.insert((next, handle));
        }

        Some(Fired {
            handle,
            kind,
            at_ms: deadline_ms,
        })
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_deadline_order() {
        let mut timers = TimerQueue::new();
        let late = timers.schedule(200, TimerKind::IdleTimeout);
        let early = timers.schedule(100, TimerKind::LongPress);

        let first = timers.pop_due(1_000).unwrap();
        assert_eq!(first.handle, early);
        assert_eq!(timers.now(), 100);
        let second = timers.pop_due(1_000).unwrap();
        assert_eq!(second.handle, late);
        assert!(timers.pop_due(1_000).is_none());
    }

    #[test]
    fn test_not_due_yet() {
        let mut timers = TimerQueue::new();
        timers.schedule(500, TimerKind::AutoAdvance);
        assert!(timers.pop_due(499).is_none());
        assert_eq!(timers.pop_due(500).unwrap().at_ms, 500);
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule(100, TimerKind::AutoAdvance);
        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert!(!timers.is_pending(handle));
        assert!(timers.pop_due(1_000).is_none());
    }

    #[test]
    fn test_delay_measured_from_current_clock() {
        let mut timers = TimerQueue::new();
        timers.set_now(1_000);
        let handle = timers.schedule(250, TimerKind::FeedbackHide);
        assert_eq!(timers.deadline(handle), Some(1_250));
    }

    #[test]
    fn test_repeating_rearms_same_handle() {
        let mut timers = TimerQueue::new();
        let handle = timers.schedule_repeating(1_000, TimerKind::ClockTick);

        let mut fired = Vec::new();
        while let Some(f) = timers.pop_due(3_500) {
            fired.push(f.at_ms);
            assert_eq!(f.handle, handle);
        }
        assert_eq!(fired, vec![1_000, 2_000, 3_000]);
        assert_eq!(timers.deadline(handle), Some(4_000));
    }

    #[test]
    fn test_pending_count_by_kind() {
        let mut timers = TimerQueue::new();
        timers.schedule(10, TimerKind::AutoAdvance);
        timers.schedule(10, TimerKind::ScrollSettle(ScrollChannel::News));
        assert_eq!(timers.pending_count(TimerKind::AutoAdvance), 1);
        assert_eq!(
            timers.pending_count(TimerKind::ScrollSettle(ScrollChannel::Panels)),
            0
        );
    }
}
