//! Reactor — top-level loop core
//!
//! Combines subscription registry + pending queue + timeout scheduler +
//! clock into a single context object, owned by the application entry point
//! and passed into every callback. Entry point for alice-events usage.
//!
//! There is one execution context and no preemption: every operation here
//! runs to completion before the next begins. Callbacks are free to call
//! back into the reactor they receive.
//!
//! Author: Moroya Sakamoto

use crate::clock::LoopClock;
use crate::payload::Payload;
use crate::queue::EventQueue;
use crate::registry::{ListenerFn, ListenerId, Registry};
use crate::timeout::{TimeoutId, TimeoutScheduler, TimerFn};

/// Shared scratch space for subscriber state (bytes)
pub const SCRATCH_SIZE: usize = 64;

/// Cooperative event-dispatch and timer core
///
/// Memory footprint at rest:
/// - Registry / queue / timer list: three empty vecs
/// - Clock: 16 bytes
/// - Scratch: 64 bytes
pub struct Reactor {
    /// Name → subscriber list
    registry: Registry,
    /// Emitted events awaiting dispatch
    queue: EventQueue,
    /// One-shot timers
    timers: TimeoutScheduler,
    /// Monotonic millisecond clock
    clock: LoopClock,
    /// Shared scratch buffer for subscriber state
    pub scratch: [u8; SCRATCH_SIZE],
    /// Events delivered to a registered name
    pub events_dispatched: u32,
    /// Events dropped for lack of a registered name
    pub events_dropped: u32,
    /// Timer callbacks fired
    pub timers_fired: u32,
}

impl Reactor {
    /// Create an idle reactor at t = 0
    pub const fn new() -> Self {
        Self {
            registry: Registry::new(),
            queue: EventQueue::new(),
            timers: TimeoutScheduler::new(),
            clock: LoopClock::new(),
            scratch: [0u8; SCRATCH_SIZE],
            events_dispatched: 0,
            events_dropped: 0,
            timers_fired: 0,
        }
    }

    /// Subscribe `func` to `name`
    pub fn on(&mut self, name: &'static str, func: ListenerFn) -> ListenerId {
        let id = self.registry.on(name, func);
        log::trace!("on {} -> listener {}", name, id.raw());
        id
    }

    /// Unsubscribe the handle `id` from `name`
    pub fn remove(&mut self, name: &'static str, id: ListenerId) -> bool {
        let found = self.registry.remove(name, id);
        log::trace!("remove {} listener {} -> {}", name, id.raw(), found);
        found
    }

    /// Current subscriber count for `name` (None if never subscribed)
    pub fn subscriber_count(&self, name: &str) -> Option<usize> {
        self.registry.subscriber_count(name)
    }

    /// Queue an event for the next dispatch pass.
    ///
    /// Never runs subscribers synchronously, even when called from inside a
    /// running callback.
    pub fn emit(&mut self, name: &'static str, payload: Payload) {
        log::trace!("emit {} {:?}", name, payload);
        self.queue.push(name, payload);
    }

    /// Dispatch every event that was pending when the call began.
    ///
    /// Events emitted by subscribers during this pass stay queued for the
    /// next pass; the snapshot bound is what keeps an event cascade from
    /// starving the loop. Each event is delivered to a snapshot of its
    /// name's subscriber list, so mid-dispatch registry mutation affects
    /// subsequent events only.
    pub fn handle_events(&mut self) {
        let n = self.queue.len();
        for _ in 0..n {
            let ev = match self.queue.pop() {
                Some(ev) => ev,
                None => break,
            };
            match self.registry.snapshot(ev.name) {
                Some(subs) => {
                    for sub in subs {
                        (sub.func)(self, ev.payload);
                    }
                    self.events_dispatched += 1;
                }
                None => {
                    log::trace!("drop {} (never subscribed)", ev.name);
                    self.events_dropped += 1;
                }
            }
        }
    }

    /// Number of events waiting for the next pass
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Schedule `func` to fire once at least `delay_ms` from now.
    ///
    /// A zero delay fires on the next expiry sweep.
    pub fn set_timeout(&mut self, func: TimerFn, delay_ms: u64) -> TimeoutId {
        let id = self.timers.set(func, delay_ms, self.clock.now_ms());
        log::trace!("set_timeout +{}ms -> timer {}", delay_ms, id.raw());
        id
    }

    /// Cancel a scheduled timeout. False once it has fired or been cleared.
    pub fn clear_timeout(&mut self, id: TimeoutId) -> bool {
        let found = self.timers.clear(id);
        log::trace!("clear_timeout timer {} -> {}", id.raw(), found);
        found
    }

    /// Fire every timer due at the current clock reading, each exactly once.
    ///
    /// Due entries are collected out of the live list before any callback
    /// runs; timers scheduled by a firing callback wait for the next sweep.
    pub fn handle_expired_callbacks(&mut self) {
        let due = self.timers.take_due(self.clock.now_ms());
        for func in due {
            func(self);
            self.timers_fired += 1;
        }
    }

    /// Number of timers waiting to fire
    pub fn scheduled_timers(&self) -> usize {
        self.timers.len()
    }

    /// Is the timeout `id` still waiting to fire?
    pub fn is_scheduled(&self, id: TimeoutId) -> bool {
        self.timers.is_scheduled(id)
    }

    /// Advance the clock by `ms` milliseconds
    pub fn advance(&mut self, ms: u64) {
        self.clock.advance(ms);
    }

    /// Catch the clock up to the host's millisecond counter
    pub fn sync(&mut self, now_ms: u64) {
        self.clock.sync(now_ms);
    }

    /// Current loop time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Log every registered event name and its subscriber count
    pub fn log_subscriptions(&self) {
        log::info!("subscriptions: {} event name(s)", self.registry.len());
        for (name, count) in self.registry.names() {
            log::info!("  {} <- {} subscriber(s)", name, count);
        }
    }
}
