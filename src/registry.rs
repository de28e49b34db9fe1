//! Subscription registry — event name → ordered subscriber list
//!
//! Names compare by content; subscriber order is registration order.
//! Entries are created lazily on first subscribe and kept for the life of
//! the registry even after their subscriber list empties, so a name that
//! was ever subscribed stays listed with count 0.
//!
//! Author: Moroya Sakamoto

use alloc::vec::Vec;

use crate::payload::Payload;
use crate::reactor::Reactor;

/// Subscriber function pointer — called once per matching event
pub type ListenerFn = fn(&mut Reactor, Payload);

/// Opaque handle identifying one subscription
///
/// Registering the same function twice under one name yields two
/// independent subscriptions with distinct handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u32);

impl ListenerId {
    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub(crate) const fn raw(self) -> u32 {
        self.0
    }
}

/// One subscription: handle + function
#[derive(Clone, Copy)]
pub(crate) struct Subscriber {
    pub(crate) id: ListenerId,
    pub(crate) func: ListenerFn,
}

/// One event name and its subscribers, in registration order
struct EventEntry {
    name: &'static str,
    subscribers: Vec<Subscriber>,
}

/// Subscription registry
///
/// Linear-scan lookup. Event-name cardinality on a control loop is tens,
/// not thousands; a map would cost more flash than it saves.
pub struct Registry {
    entries: Vec<EventEntry>,
    next_id: u32,
}

impl Registry {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Register `func` under `name`, creating the entry on first use.
    ///
    /// Appends to the end of the subscriber list; dispatch follows
    /// registration order. Infallible.
    pub fn on(&mut self, name: &'static str, func: ListenerFn) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let sub = Subscriber { id, func };

        for entry in self.entries.iter_mut() {
            if entry.name == name {
                entry.subscribers.push(sub);
                return id;
            }
        }

        let mut subscribers = Vec::new();
        subscribers.push(sub);
        self.entries.push(EventEntry { name, subscribers });
        id
    }

    /// Drop the subscription `id` under `name`.
    ///
    /// Returns false when the name was never subscribed, or when the handle
    /// is not under that name. The search stops at the name match; entries
    /// are unique per name.
    pub fn remove(&mut self, name: &'static str, id: ListenerId) -> bool {
        for entry in self.entries.iter_mut() {
            if entry.name == name {
                for i in 0..entry.subscribers.len() {
                    if entry.subscribers[i].id == id {
                        entry.subscribers.remove(i);
                        return true;
                    }
                }
                return false;
            }
        }
        false
    }

    /// Subscribers of `name` as of this call, in order (None if never subscribed)
    pub(crate) fn snapshot(&self, name: &str) -> Option<Vec<Subscriber>> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.subscribers.clone())
    }

    /// Current subscriber count for `name` (None if never subscribed)
    pub fn subscriber_count(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.subscribers.len())
    }

    /// Registered names with their subscriber counts, in creation order
    pub fn names(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.entries.iter().map(|e| (e.name, e.subscribers.len()))
    }

    /// Number of registered event names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True until the first subscription creates an entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
