//! One execution context (one "tab") attached to a shared store.
//!
//! DESIGN
//! ======
//! A `Context` owns the gateway, the store's change feed, the handler
//! registry and a cache of live binding cells. It is single-threaded: all
//! of its state sits in `Rc`/`RefCell`, and notifications from other
//! contexts are applied only when the owner calls
//! [`Context::dispatch_pending`], the way a browser runs `storage` event
//! handlers between other tasks.
//!
//! Within one context, [`Context::bind`] hands out handles on a single shared
//! cell per logical key, so every consumer of a key sees every local write
//! immediately. [`Context::bind_independent`] opts out and gives the caller a
//! private mirror that converges with the others only through the store.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::area::{ChangeFeed, ContextId, StorageArea};
use crate::binding::{Binding, BindingCell};
use crate::bus::ChangeBus;
use crate::config::StorageConfig;
use crate::gateway::Storage;
use crate::keys::Key;

pub struct Context {
    storage: Storage,
    bus: Rc<ChangeBus>,
    feed: RefCell<ChangeFeed>,
    live: RefCell<HashMap<String, Weak<dyn Any>>>,
}

impl Context {
    pub fn new(area: Rc<dyn StorageArea>, config: &StorageConfig) -> Self {
        Self::with_storage(Storage::from_config(area, config))
    }

    /// Attach to the store behind `storage`. Changes made by other contexts
    /// from this point on are queued for [`Context::dispatch_pending`].
    pub fn with_storage(storage: Storage) -> Self {
        let feed = storage.area().subscribe();
        debug!(context = feed.context().as_u64(), prefix = %storage.prefix(), "storage context attached");
        Self { storage, bus: ChangeBus::new(), feed: RefCell::new(feed), live: RefCell::new(HashMap::new()) }
    }

    #[must_use]
    pub fn id(&self) -> ContextId {
        self.feed.borrow().context()
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Handle on the shared cell for `key`, creating it from the store (or
    /// `default`) if no live cell exists.
    ///
    /// A live cell bound with a different value type cannot be shared; that
    /// caller gets an independent cell instead.
    pub fn bind<T>(&self, key: &str, default: T) -> Binding<T>
    where
        T: Serialize + DeserializeOwned + Clone + 'static,
    {
        let existing = {
            let mut live = self.live.borrow_mut();
            live.retain(|_, cell| cell.strong_count() > 0);
            live.get(key).and_then(Weak::upgrade)
        };

        if let Some(cell) = existing {
            match cell.downcast::<BindingCell<T>>() {
                Ok(cell) => return Binding::from_cell(cell),
                Err(_) => {
                    warn!(key, "key already bound with another value type; binding independently");
                    return self.bind_independent(key, default);
                }
            }
        }

        let binding = self.bind_independent(key, default);
        let cell: Rc<dyn Any> = Rc::clone(binding.cell()) as Rc<dyn Any>;
        self.live.borrow_mut().insert(key.to_owned(), Rc::downgrade(&cell));
        binding
    }

    /// Handle on the shared cell for a typed key.
    pub fn bind_key<T>(&self, key: &Key<T>) -> Binding<T>
    where
        T: Serialize + DeserializeOwned + Clone + 'static,
    {
        self.bind(key.name(), key.default_value())
    }

    /// Fresh private cell for `key`, not shared with other handles in this
    /// context.
    pub fn bind_independent<T>(&self, key: &str, default: T) -> Binding<T>
    where
        T: Serialize + DeserializeOwned + Clone + 'static,
    {
        Binding::create(&self.storage, &self.bus, key, default)
    }

    /// Deliver every queued change from other contexts to the bindings
    /// watching its key. Returns how many events were drained.
    pub fn dispatch_pending(&self) -> usize {
        let mut drained = 0;
        loop {
            let Some(event) = self.feed.borrow_mut().try_next() else {
                break;
            };
            drained += 1;
            let delivered = self.bus.dispatch(&event);
            debug!(key = %event.key, delivered, "storage change dispatched");
        }
        drained
    }

    /// Number of live shared cells.
    #[must_use]
    pub fn live_bindings(&self) -> usize {
        self.live.borrow().values().filter(|cell| cell.strong_count() > 0).count()
    }

    /// Number of change subscriptions currently held by cells in this context.
    #[must_use]
    pub fn subscriptions(&self) -> usize {
        self.bus.len()
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
