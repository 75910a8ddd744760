//! In-process shared store standing in for a browser storage origin.
//!
//! DESIGN
//! ======
//! `MemoryOrigin` is the process-wide store: a mutex-guarded map plus a
//! broadcast channel of change events. Each `MemoryArea` is one context's
//! handle onto it. Writes are last-write-wins with no isolation; every
//! effective change is broadcast tagged with the writer's `ContextId`, and
//! feeds drop their own context's events.
//!
//! TRADE-OFFS
//! ==========
//! Quota accounting counts UTF-8 bytes of key plus value, not the UTF-16
//! code units browsers use. Close enough to exercise the failure path.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tracing::{debug, trace};

use super::{ChangeFeed, ContextId, StorageArea, StorageEvent};
use crate::config::{DEFAULT_EVENT_CAPACITY, StorageConfig};
use crate::error::StorageError;

/// Shared backing store for any number of [`MemoryArea`] contexts.
#[derive(Clone)]
pub struct MemoryOrigin {
    inner: Arc<OriginInner>,
}

struct OriginInner {
    entries: Mutex<Entries>,
    events: broadcast::Sender<StorageEvent>,
    quota_bytes: Option<usize>,
    available: AtomicBool,
}

#[derive(Default)]
struct Entries {
    map: BTreeMap<String, String>,
    /// Running total of key + value bytes.
    used_bytes: usize,
}

fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

impl MemoryOrigin {
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self::with_limits(config.event_capacity, config.quota_bytes)
    }

    /// Origin with no byte quota and the default event capacity.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::with_limits(DEFAULT_EVENT_CAPACITY, None)
    }

    #[must_use]
    pub fn with_limits(event_capacity: usize, quota_bytes: Option<usize>) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            inner: Arc::new(OriginInner {
                entries: Mutex::new(Entries::default()),
                events,
                quota_bytes,
                available: AtomicBool::new(true),
            }),
        }
    }

    /// Attach a new execution context to this store.
    #[must_use]
    pub fn open_context(&self) -> MemoryArea {
        let context = ContextId::next();
        debug!(context = context.as_u64(), "memory storage context opened");
        MemoryArea { origin: self.clone(), context }
    }

    /// Simulate the store becoming inaccessible (or recovering).
    pub fn set_available(&self, available: bool) {
        self.inner.available.store(available, Ordering::SeqCst);
    }

    /// Copy of every physical entry, for inspection.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.lock().map.clone()
    }

    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.lock().used_bytes
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn ensure_available(&self) -> Result<(), StorageError> {
        if self.inner.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StorageError::Unavailable("memory store disabled".to_owned()))
        }
    }

    fn publish(&self, event: StorageEvent) {
        // No receivers yet means no other context to notify.
        if self.inner.events.send(event).is_err() {
            trace!("no storage feed attached; dropping change");
        }
    }
}

/// One context's handle onto a [`MemoryOrigin`].
#[derive(Clone)]
pub struct MemoryArea {
    origin: MemoryOrigin,
    context: ContextId,
}

impl MemoryArea {
    #[must_use]
    pub fn context(&self) -> ContextId {
        self.context
    }

    #[must_use]
    pub fn origin(&self) -> &MemoryOrigin {
        &self.origin
    }
}

impl StorageArea for MemoryArea {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.origin.ensure_available()?;
        Ok(self.origin.lock().map.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.origin.ensure_available()?;
        let old_value = {
            let mut entries = self.origin.lock();
            let old_size = entries.map.get(key).map_or(0, |old| entry_size(key, old));
            let needed = entries.used_bytes - old_size + entry_size(key, value);
            if let Some(limit) = self.origin.inner.quota_bytes {
                if needed > limit {
                    return Err(StorageError::QuotaExceeded { key: key.to_owned(), needed, limit });
                }
            }
            let old_value = entries.map.insert(key.to_owned(), value.to_owned());
            entries.used_bytes = needed;
            old_value
        };

        if old_value.as_deref() == Some(value) {
            return Ok(());
        }
        self.origin.publish(StorageEvent {
            key: key.to_owned(),
            old_value,
            new_value: Some(value.to_owned()),
            origin: self.context,
        });
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.origin.ensure_available()?;
        let removed = {
            let mut entries = self.origin.lock();
            let removed = entries.map.remove(key);
            if let Some(old) = &removed {
                entries.used_bytes -= entry_size(key, old);
            }
            removed
        };

        if let Some(old_value) = removed {
            self.origin.publish(StorageEvent {
                key: key.to_owned(),
                old_value: Some(old_value),
                new_value: None,
                origin: self.context,
            });
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.origin.ensure_available()?;
        Ok(self.origin.lock().map.keys().cloned().collect())
    }

    fn subscribe(&self) -> ChangeFeed {
        ChangeFeed::new(self.origin.inner.events.subscribe(), self.context)
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
