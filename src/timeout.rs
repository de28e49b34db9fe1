//! Timeout scheduler — one-shot callbacks after a minimum delay
//!
//! Entries are swept once per loop iteration. A sweep first collects every
//! due entry out of the live list, then invokes the callbacks, so a callback
//! that schedules new timers never sees them fire in the same sweep.
//!
//! Author: Moroya Sakamoto

use alloc::vec::Vec;

use crate::reactor::Reactor;

/// Timer callback function pointer — fired exactly once
pub type TimerFn = fn(&mut Reactor);

/// Opaque handle identifying one scheduled timeout
///
/// Unique among currently scheduled timers; ids wrap and may be reused
/// long after the original entry fired or was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutId(u32);

impl TimeoutId {
    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub(crate) const fn raw(self) -> u32 {
        self.0
    }
}

/// One scheduled timeout
struct TimeoutEntry {
    id: TimeoutId,
    expires_at_ms: u64,
    func: TimerFn,
}

/// One-shot timeout scheduler
///
/// Plain list in scheduling order. Sweeps are linear; the expected live
/// timer count on a control loop is single digits.
pub struct TimeoutScheduler {
    entries: Vec<TimeoutEntry>,
    next_id: u32,
}

impl TimeoutScheduler {
    /// Create an empty scheduler
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `func` to fire once at least `delay_ms` has elapsed past
    /// `now_ms`. A zero delay fires on the next sweep.
    pub fn set(&mut self, func: TimerFn, delay_ms: u64, now_ms: u64) -> TimeoutId {
        let id = TimeoutId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(TimeoutEntry {
            id,
            expires_at_ms: now_ms.saturating_add(delay_ms),
            func,
        });
        id
    }

    /// Cancel a scheduled timeout.
    ///
    /// Returns false for ids that already fired, were already cancelled, or
    /// were never issued.
    pub fn clear(&mut self, id: TimeoutId) -> bool {
        for i in 0..self.entries.len() {
            if self.entries[i].id == id {
                self.entries.remove(i);
                return true;
            }
        }
        false
    }

    /// Remove and return the callbacks of every entry due at `now_ms`,
    /// in scheduling order.
    ///
    /// Entries leave the live list before any callback runs; a due entry
    /// can no longer be cancelled once the sweep has begun.
    pub(crate) fn take_due(&mut self, now_ms: u64) -> Vec<TimerFn> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].expires_at_ms <= now_ms {
                due.push(self.entries.remove(i).func);
            } else {
                i += 1;
            }
        }
        due
    }

    /// Is `id` still waiting to fire?
    pub fn is_scheduled(&self, id: TimeoutId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of scheduled timeouts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is anything scheduled?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
