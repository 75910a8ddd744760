//! Raw string stores the gateway sits on.
//!
//! SYSTEM CONTEXT
//! ==============
//! A storage area is one execution context's view of a shared, synchronous,
//! string-keyed store (a browser tab's `localStorage`, or an in-process
//! stand-in). Areas know nothing about prefixes or JSON; the gateway in
//! [`crate::gateway`] layers those on top.
//!
//! Change notification mirrors the browser `storage` event: it is store-wide,
//! carries raw physical keys and raw values, and is only delivered to
//! contexts other than the writer.

pub mod file;
#[cfg(feature = "hydrate")]
pub mod local;
pub mod memory;

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::warn;

use crate::error::StorageError;

pub use file::FileArea;
#[cfg(feature = "hydrate")]
pub use local::LocalStorageArea;
pub use memory::{MemoryArea, MemoryOrigin};

/// Identity of one execution context (one "tab") attached to a store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContextId(u64);

impl ContextId {
    /// Origin tag for events raised outside this process (browser tabs).
    pub const EXTERNAL: Self = Self(0);

    /// Allocate a process-unique context id.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// One change to the shared store, as seen by other contexts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageEvent {
    /// Raw physical key that changed.
    pub key: String,
    pub old_value: Option<String>,
    /// New raw value; `None` when the key was removed.
    pub new_value: Option<String>,
    /// Context whose write produced the event.
    pub origin: ContextId,
}

/// Synchronous string store as seen from a single execution context.
pub trait StorageArea {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Absent keys are not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Every physical key currently in the store, namespaced or not.
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    /// Feed of changes made by other contexts from this point on.
    fn subscribe(&self) -> ChangeFeed;
}

/// Receiving end of the store-wide change channel for one context.
///
/// Events written by the owning context are filtered out, so a feed only
/// ever yields changes made elsewhere.
#[derive(Debug)]
pub struct ChangeFeed {
    receiver: broadcast::Receiver<StorageEvent>,
    context: ContextId,
}

impl ChangeFeed {
    #[must_use]
    pub fn new(receiver: broadcast::Receiver<StorageEvent>, context: ContextId) -> Self {
        Self { receiver, context }
    }

    #[must_use]
    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Next pending event from another context, without blocking.
    pub fn try_next(&mut self) -> Option<StorageEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if event.origin == self.context => {}
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(context = self.context.0, skipped, "change feed lagged; events dropped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }
}
