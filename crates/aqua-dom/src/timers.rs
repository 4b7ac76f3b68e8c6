//! Timer queue
//!
//! setTimeout on a virtual millisecond clock. Time only moves when the
//! document is advanced, which keeps timer-driven behaviour deterministic.

use crate::Document;

/// Deferred callback
pub(crate) type TimerCallback = Box<dyn FnOnce(&mut Document)>;

/// Timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

struct Timer {
    id: TimerId,
    due_at: u64,
    callback: TimerCallback,
}

#[derive(Default)]
pub(crate) struct TimerQueue {
    timers: Vec<Timer>,
    next_id: u64,
    current_time: u64,
}

impl TimerQueue {
    /// Schedule a one-shot timer relative to the current time
    pub(crate) fn schedule(&mut self, delay_ms: u64, callback: TimerCallback) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.push(Timer {
            id,
            due_at: self.current_time.saturating_add(delay_ms),
            callback,
        });
        id
    }

    pub(crate) fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() < before
    }

    pub(crate) fn now(&self) -> u64 {
        self.current_time
    }

    /// Take the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Ties fire in scheduling order.
    pub(crate) fn pop_due(&mut self, until: u64) -> Option<TimerCallback> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_at <= until)
            .min_by_key(|(_, t)| (t.due_at, t.id))
            .map(|(i, _)| i)?;
        let timer = self.timers.swap_remove(pos);
        self.current_time = self.current_time.max(timer.due_at);
        Some(timer.callback)
    }

    /// Move the clock forward after all due timers ran
    pub(crate) fn settle(&mut self, until: u64) {
        self.current_time = self.current_time.max(until);
    }

    pub(crate) fn pending(&self) -> usize {
        self.timers.len()
    }

    pub(crate) fn next_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_at).min()
    }
}

impl std::fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("pending", &self.timers.len())
            .field("current_time", &self.current_time)
            .finish()
    }
}
