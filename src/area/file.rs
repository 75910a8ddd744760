//! JSON-file backed store for native tooling.
//!
//! The whole store is one JSON object of string values, loaded at open and
//! rewritten (temp file, then rename) after every mutation. A file area is
//! a single execution context, so its change feed never yields.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tokio::sync::broadcast;
use tracing::{debug, info};

use super::{ChangeFeed, ContextId, StorageArea, StorageEvent};
use crate::error::StorageError;

pub struct FileArea {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
    context: ContextId,
    events: broadcast::Sender<StorageEvent>,
}

impl FileArea {
    /// Load `path`, treating a missing file as an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        info!(path = %path.display(), entries = entries.len(), "file storage opened");

        let (events, _) = broadcast::channel(1);
        Ok(Self { path, entries: Mutex::new(entries), context: ContextId::next(), events })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Sibling of the store path with `.tmp` appended, never the store itself.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(entries)?;
        let tmp = self.temp_path();
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), entries = entries.len(), "file storage flushed");
        Ok(())
    }
}

impl StorageArea for FileArea {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.lock();
        let previous = entries.insert(key.to_owned(), value.to_owned());
        if let Err(err) = self.flush(&entries) {
            // Keep memory in step with the file when the write did not land.
            match previous {
                Some(old) => entries.insert(key.to_owned(), old),
                None => entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.lock();
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };
        if let Err(err) = self.flush(&entries) {
            entries.insert(key.to_owned(), previous);
            return Err(err);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.lock().keys().cloned().collect())
    }

    fn subscribe(&self) -> ChangeFeed {
        ChangeFeed::new(self.events.subscribe(), self.context)
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
