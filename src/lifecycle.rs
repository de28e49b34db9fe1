//! Loop lifecycle — wiring between the host loop and the reactor
//!
//! The host calls `run_iteration` once per pass through its forever-loop.
//! The timeout sweep is subscribed to `"loop_end"` here, at the integration
//! layer; neither the queue nor the timer list knows the other exists.
//!
//! Per-iteration order: `"loop"` subscribers, then `"loop_end"` subscribers
//! (the timer sweep among them), all within one dispatch pass. Events a
//! subscriber emits along the way wait for the next iteration.
//!
//! Author: Moroya Sakamoto

use crate::payload::Payload;
use crate::reactor::Reactor;
use crate::registry::ListenerId;

/// Emitted at the start of every loop iteration
pub const LOOP: &str = "loop";
/// Emitted once, the first time the host reports the serial link up
pub const SERIAL_CONNECTED: &str = "serial_connected";
/// Emitted at the end of every loop iteration, after `LOOP`
pub const LOOP_END: &str = "loop_end";

/// `"loop_end"` subscriber that drives the timeout sweep
fn sweep_timers(reactor: &mut Reactor, _payload: Payload) {
    reactor.handle_expired_callbacks();
}

/// Host-loop driver
///
/// Owns the integration state: the sweep subscription and the one-shot
/// serial-connected latch.
pub struct Lifecycle {
    sweep_id: ListenerId,
    serial_announced: bool,
}

impl Lifecycle {
    /// Wire the timeout sweep to `LOOP_END` and return the driver
    pub fn wire(reactor: &mut Reactor) -> Self {
        let sweep_id = reactor.on(LOOP_END, sweep_timers);
        log::debug!("lifecycle wired, timer sweep on {}", LOOP_END);
        Self {
            sweep_id,
            serial_announced: false,
        }
    }

    /// Run one loop iteration.
    ///
    /// Advances the clock by the time elapsed since the previous iteration,
    /// brackets the pass with `LOOP` / `LOOP_END`, then drains the events
    /// pending at that point — which makes the timer sweep run exactly once
    /// per iteration, after the ordinary `LOOP` subscribers.
    pub fn run_iteration(&mut self, reactor: &mut Reactor, elapsed_ms: u64) {
        reactor.advance(elapsed_ms);
        reactor.emit(LOOP, Payload::None);
        reactor.emit(LOOP_END, Payload::None);
        reactor.handle_events();
    }

    /// Report the serial link state; emits `SERIAL_CONNECTED` on the first
    /// up transition and never again.
    pub fn poll_serial(&mut self, reactor: &mut Reactor, link_up: bool) {
        if link_up && !self.serial_announced {
            self.serial_announced = true;
            reactor.emit(SERIAL_CONNECTED, Payload::None);
        }
    }

    /// Detach the timer sweep from `LOOP_END`
    pub fn unwire(self, reactor: &mut Reactor) -> bool {
        reactor.remove(LOOP_END, self.sweep_id)
    }
}
