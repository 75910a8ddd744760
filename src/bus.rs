//! Per-context handler registry for store change events.
//!
//! DESIGN
//! ======
//! Handlers are registered against one physical key and released by
//! dropping the returned [`Subscription`]. Dispatch snapshots the handler
//! list before calling anything, so a handler may create or drop
//! subscriptions while it runs.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::area::StorageEvent;

pub type Handler = Rc<dyn Fn(&StorageEvent)>;

#[derive(Default)]
pub struct ChangeBus {
    next_id: Cell<u64>,
    handlers: RefCell<HashMap<String, Vec<(u64, Handler)>>>,
}

impl ChangeBus {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Register `handler` for changes to `physical_key`.
    pub fn subscribe(self: &Rc<Self>, physical_key: String, handler: Handler) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.handlers
            .borrow_mut()
            .entry(physical_key.clone())
            .or_default()
            .push((id, handler));
        Subscription { bus: Rc::downgrade(self), key: physical_key, id }
    }

    /// Deliver `event` to every handler registered for its key.
    pub fn dispatch(&self, event: &StorageEvent) -> usize {
        let handlers: Vec<Handler> = self
            .handlers
            .borrow()
            .get(&event.key)
            .map(|list| list.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default();
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    /// Number of live subscriptions across all keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.borrow().values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn release(&self, key: &str, id: u64) {
        let mut handlers = self.handlers.borrow_mut();
        if let Some(list) = handlers.get_mut(key) {
            list.retain(|(existing, _)| *existing != id);
            if list.is_empty() {
                handlers.remove(key);
            }
        }
    }
}

/// Registration guard; the handler is removed when this drops.
pub struct Subscription {
    bus: Weak<ChangeBus>,
    key: String,
    id: u64,
}

impl Subscription {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.release(&self.key, self.id);
        }
    }
}

#[cfg(test)]
#[path = "bus_test.rs"]
mod tests;
