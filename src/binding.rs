//! Reactive binding of one namespaced key to an in-memory value.
//!
//! DESIGN
//! ======
//! A binding cell loads its key once at creation, writes every local change
//! back through the gateway, and subscribes to the context's change bus for
//! changes made by other contexts. All handles to a cell share one value.
//!
//! Local write: resolve the new value, write it through [`Storage::set`],
//! then publish it locally. A failed write is logged by the gateway and the
//! local publish still happens.
//!
//! External change: parse the new raw value and publish it on success.
//! Unlike initialization there is no fallback to the default, so a garbled
//! or half-written value from another tab never resets this tab's view.
//! Removals are ignored for the same reason.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::area::StorageEvent;
use crate::bus::{ChangeBus, Handler, Subscription};
use crate::gateway::Storage;

/// New value for a binding: a literal replacement, or a function of the
/// current value.
pub enum SetValue<T> {
    Replace(T),
    Update(Box<dyn FnOnce(&T) -> T>),
}

impl<T> SetValue<T> {
    pub fn update(f: impl FnOnce(&T) -> T + 'static) -> Self {
        Self::Update(Box::new(f))
    }

    fn resolve(self, current: &T) -> T {
        match self {
            Self::Replace(value) => value,
            Self::Update(f) => f(current),
        }
    }
}

impl<T> From<T> for SetValue<T> {
    fn from(value: T) -> Self {
        Self::Replace(value)
    }
}

/// Handle returned by [`Binding::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer<T> = Rc<RefCell<dyn FnMut(&T)>>;

pub(crate) struct BindingCell<T> {
    key: String,
    physical_key: String,
    storage: Storage,
    value: RefCell<T>,
    observers: RefCell<Vec<(ObserverId, Observer<T>)>>,
    next_observer: Cell<u64>,
    /// Bumped on every publish; a round stops once a nested write supersedes it.
    generation: Cell<u64>,
    subscription: RefCell<Option<Subscription>>,
}

impl<T> BindingCell<T>
where
    T: Clone + DeserializeOwned + 'static,
{
    fn reconcile(&self, event: &StorageEvent) {
        let Some(raw) = event.new_value.as_deref().filter(|raw| !raw.is_empty()) else {
            debug!(key = %self.physical_key, "ignoring removal from another context");
            return;
        };
        match serde_json::from_str::<T>(raw) {
            Ok(value) => {
                trace!(key = %self.physical_key, "applying change from another context");
                self.publish(value);
            }
            Err(err) => {
                debug!(key = %self.physical_key, error = %err, "ignoring unparsable change from another context");
            }
        }
    }

    fn publish(&self, value: T) {
        *self.value.borrow_mut() = value.clone();
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let observers: Vec<Observer<T>> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in observers {
            // A nested write already delivered a newer value to the rest.
            if self.generation.get() != generation {
                break;
            }
            // An observer that writes back re-enters here; skip it rather than recurse.
            if let Ok(mut callback) = observer.try_borrow_mut() {
                callback(&value);
            }
        }
    }
}

/// Typed read/write handle on one namespaced key.
///
/// Cloning is cheap and yields another handle on the same cell. The change
/// subscription is released when the last handle drops.
pub struct Binding<T> {
    cell: Rc<BindingCell<T>>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self { cell: Rc::clone(&self.cell) }
    }
}

impl<T> Binding<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    /// Load `key` through `storage` and subscribe the new cell on `bus`.
    pub(crate) fn create(storage: &Storage, bus: &Rc<ChangeBus>, key: &str, default: T) -> Self {
        let initial = storage.get(key, default);
        let physical_key = storage.physical_key(key);
        let cell = Rc::new(BindingCell {
            key: key.to_owned(),
            physical_key: physical_key.clone(),
            storage: storage.clone(),
            value: RefCell::new(initial),
            observers: RefCell::new(Vec::new()),
            next_observer: Cell::new(0),
            generation: Cell::new(0),
            subscription: RefCell::new(None),
        });

        let weak = Rc::downgrade(&cell);
        let handler: Handler = Rc::new(move |event: &StorageEvent| {
            if let Some(cell) = weak.upgrade() {
                cell.reconcile(event);
            }
        });
        *cell.subscription.borrow_mut() = Some(bus.subscribe(physical_key, handler));

        Self { cell }
    }

    pub(crate) fn from_cell(cell: Rc<BindingCell<T>>) -> Self {
        Self { cell }
    }

    pub(crate) fn cell(&self) -> &Rc<BindingCell<T>> {
        &self.cell
    }

    /// Logical key this binding mirrors.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.cell.key
    }

    #[must_use]
    pub fn physical_key(&self) -> &str {
        &self.cell.physical_key
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.cell.value.borrow().clone()
    }

    /// Run `f` on a snapshot of the current value. `f` may write through any
    /// handle on this cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let current = self.get();
        f(&current)
    }

    /// Replace the value, persist it, and notify observers.
    pub fn set(&self, value: T) {
        self.commit(value);
    }

    /// Derive the next value from the current one, persist it, and notify
    /// observers.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let current = self.get();
        self.commit(f(&current));
    }

    /// Apply either form of change.
    pub fn apply(&self, change: impl Into<SetValue<T>>) {
        let current = self.get();
        self.commit(change.into().resolve(&current));
    }

    /// Run `f` after every local write and every accepted external change.
    pub fn observe(&self, f: impl FnMut(&T) + 'static) -> ObserverId {
        let id = ObserverId(self.cell.next_observer.get());
        self.cell.next_observer.set(id.0 + 1);
        let observer: Observer<T> = Rc::new(RefCell::new(f));
        self.cell.observers.borrow_mut().push((id, observer));
        id
    }

    /// Stop notifying `id`. Returns whether it was registered.
    pub fn unobserve(&self, id: ObserverId) -> bool {
        let mut observers = self.cell.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Whether both handles share one cell.
    #[must_use]
    pub fn same_cell(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    fn commit(&self, value: T) {
        self.cell.storage.set(&self.cell.key, &value);
        self.cell.publish(value);
    }
}

#[cfg(test)]
#[path = "binding_test.rs"]
mod tests;
