//! ALICE-Events — Event-First Loop Core
//!
//! Don't poll your peripherals, subscribe to them.
//!
//! Cooperative event dispatch and one-shot timers for single-threaded,
//! interrupt-free control loops:
//! - Publish/subscribe by event name, delivery deferred to the next pass
//! - One-shot timeouts, swept once per loop iteration via `"loop_end"`
//! - Explicit context object, no global state, deterministic tests
//! - no_std + alloc; the host loop supplies the heap and the clock
//!
//! Author: Moroya Sakamoto

#![no_std]

extern crate alloc;

pub mod clock;
pub mod lifecycle;
pub mod payload;
pub mod queue;
pub mod reactor;
pub mod registry;
pub mod timeout;

pub use clock::LoopClock;
pub use lifecycle::{Lifecycle, LOOP, LOOP_END, SERIAL_CONNECTED};
pub use payload::Payload;
pub use queue::EventQueue;
pub use reactor::Reactor;
pub use registry::{ListenerFn, ListenerId, Registry};
pub use timeout::{TimeoutId, TimeoutScheduler, TimerFn};
