//! Namespaced JSON gateway over a storage area.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every consumer reads and writes application state through [`Storage`].
//! It prefixes logical keys so Pet Square entries never collide with other
//! entries in the same shared store, and moves values through JSON.
//!
//! ERROR HANDLING
//! ==============
//! `get`, `set`, `remove` and `clear` are total. Unreadable or corrupt
//! entries fall back to the caller's default; failed writes go to the
//! diagnostic log and the caller carries on as if they had landed. The UI
//! must never stall or crash on persistence, so durability is best-effort.
//! Callers that need to know use [`Storage::try_set`],
//! [`Storage::try_remove`] and [`Storage::try_clear`].

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::area::StorageArea;
use crate::config::StorageConfig;
use crate::error::StorageError;

/// Namespaced, JSON-encoding view of one context's storage area.
#[derive(Clone)]
pub struct Storage {
    area: Rc<dyn StorageArea>,
    prefix: Rc<str>,
}

impl Storage {
    pub fn new(area: Rc<dyn StorageArea>, prefix: &str) -> Self {
        Self { area, prefix: Rc::from(prefix) }
    }

    pub fn from_config(area: Rc<dyn StorageArea>, config: &StorageConfig) -> Self {
        Self::new(area, &config.prefix)
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn area(&self) -> &Rc<dyn StorageArea> {
        &self.area
    }

    /// Physical key for a logical key: prefix followed by the name.
    #[must_use]
    pub fn physical_key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }

    /// Logical key for a physical key, or `None` outside the namespace.
    #[must_use]
    pub fn logical_key<'a>(&self, physical: &'a str) -> Option<&'a str> {
        physical.strip_prefix(&*self.prefix)
    }

    /// Load the value at `key`, or `default` when absent, empty, corrupt, or
    /// unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let physical = self.physical_key(key);
        match self.area.get_item(&physical) {
            Ok(Some(raw)) if !raw.is_empty() => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    debug!(key = %physical, error = %err, "stored value did not parse; using default");
                    default
                }
            },
            Ok(_) => default,
            Err(err) => {
                warn!(key = %physical, error = %err, "storage read failed; using default");
                default
            }
        }
    }

    /// Raw stored text at `key`, if any. Read failures count as absent.
    #[must_use]
    pub fn get_raw(&self, key: &str) -> Option<String> {
        let physical = self.physical_key(key);
        self.area.get_item(&physical).unwrap_or_else(|err| {
            warn!(key = %physical, error = %err, "storage read failed");
            None
        })
    }

    /// Serialize and store `value` at `key`. Failures are logged and dropped.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(err) = self.try_set(key, value) {
            error!(key = %self.physical_key(key), error = %err, "storage write failed");
        }
    }

    /// Serialize and store `value` at `key`, reporting failure.
    pub fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.area.set_item(&self.physical_key(key), &raw)
    }

    /// Delete `key`. Absent keys are a no-op.
    pub fn remove(&self, key: &str) {
        if let Err(err) = self.try_remove(key) {
            error!(key = %self.physical_key(key), error = %err, "storage remove failed");
        }
    }

    /// Delete `key`, reporting failure.
    pub fn try_remove(&self, key: &str) -> Result<(), StorageError> {
        self.area.remove_item(&self.physical_key(key))
    }

    /// Delete every key in this namespace, leaving foreign keys alone.
    /// Returns how many keys were removed.
    pub fn clear(&self) -> usize {
        let physical_keys = match self.area.keys() {
            Ok(keys) => keys,
            Err(err) => {
                error!(prefix = %self.prefix, error = %err, "storage clear could not list keys");
                return 0;
            }
        };

        let mut removed = 0;
        for physical in self.namespaced(&physical_keys) {
            match self.area.remove_item(physical) {
                Ok(()) => removed += 1,
                Err(err) => error!(key = %physical, error = %err, "storage remove failed during clear"),
            }
        }
        debug!(prefix = %self.prefix, removed, "storage namespace cleared");
        removed
    }

    /// Delete every key in this namespace, stopping at the first failure.
    pub fn try_clear(&self) -> Result<usize, StorageError> {
        let physical_keys = self.area.keys()?;
        let mut removed = 0;
        for physical in self.namespaced(&physical_keys) {
            self.area.remove_item(physical)?;
            removed += 1;
        }
        debug!(prefix = %self.prefix, removed, "storage namespace cleared");
        Ok(removed)
    }

    fn namespaced<'a>(&'a self, physical_keys: &'a [String]) -> impl Iterator<Item = &'a String> + 'a {
        physical_keys.iter().filter(|k| k.starts_with(&*self.prefix))
    }

    /// Logical keys currently present in this namespace.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        match self.area.keys() {
            Ok(keys) => keys
                .iter()
                .filter_map(|physical| self.logical_key(physical))
                .map(str::to_owned)
                .collect(),
            Err(err) => {
                warn!(prefix = %self.prefix, error = %err, "storage key listing failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;
