//! Browser `localStorage` area.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps `window.localStorage` for hydrate builds. The browser only fires the
//! `storage` event in tabs other than the writer, so forwarded events are
//! tagged [`ContextId::EXTERNAL`] and always pass the feed's own-context
//! filter. Whoever drives the page's event loop calls
//! [`Context::dispatch_pending`](crate::context::Context::dispatch_pending)
//! to deliver them.

use tokio::sync::broadcast;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use super::{ChangeFeed, ContextId, StorageArea, StorageEvent};
use crate::error::StorageError;

pub struct LocalStorageArea {
    storage: web_sys::Storage,
    context: ContextId,
    events: broadcast::Sender<StorageEvent>,
    listener: Closure<dyn FnMut(web_sys::StorageEvent)>,
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{err:?}"))
}

impl LocalStorageArea {
    /// Attach to the current window's `localStorage` and start forwarding
    /// `storage` events.
    pub fn open(event_capacity: usize) -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))?;

        let (events, _) = broadcast::channel(event_capacity.max(1));
        let sender = events.clone();
        let listener = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |event: web_sys::StorageEvent| {
            // `key` is null when another tab calls `localStorage.clear()`.
            let Some(key) = event.key() else {
                debug!("ignoring storage clear event");
                return;
            };
            let event = StorageEvent {
                key,
                old_value: event.old_value(),
                new_value: event.new_value(),
                origin: ContextId::EXTERNAL,
            };
            if sender.send(event).is_err() {
                debug!("no storage feed attached; dropping change");
            }
        });
        window
            .add_event_listener_with_callback("storage", listener.as_ref().unchecked_ref())
            .map_err(js_error)?;

        Ok(Self { storage, context: ContextId::next(), events, listener })
    }
}

impl Drop for LocalStorageArea {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.remove_event_listener_with_callback("storage", self.listener.as_ref().unchecked_ref())
            {
                debug!(error = ?err, "storage listener removal failed");
            }
        }
    }
}

impl StorageArea for LocalStorageArea {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Quota failures arrive as an opaque `DOMException`; the message keeps the name.
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(js_error)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let len = self.storage.length().map_err(js_error)?;
        let mut keys = Vec::with_capacity(len as usize);
        for index in 0..len {
            if let Some(key) = self.storage.key(index).map_err(js_error)? {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    fn subscribe(&self) -> ChangeFeed {
        ChangeFeed::new(self.events.subscribe(), self.context)
    }
}
