//! File-backed suggestion lists.

use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

use log::debug;
use serde::{Deserialize, Serialize};

use semesmart_core::errors::StoreError;
use semesmart_core::suggestions::{SuggestionKind, SuggestionStoreTrait};
use semesmart_core::{Error, Result};

const CURRENT_VERSION: u32 = 1;

/// All suggestion lists, stored as one pretty-printed JSON file on the
/// device. Lists are keyed by [`SuggestionKind::storage_key`] so the file
/// stays readable next to the keys the product has always used.
#[derive(Debug)]
pub struct FileSuggestionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

#[derive(Serialize, Deserialize, Default)]
struct StoredLists {
    version: u32,
    lists: HashMap<String, Vec<String>>,
}

impl FileSuggestionStore {
    /// Create a store over the given file. The file and its parent
    /// directories are only created on first save.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| Error::Store(StoreError::Io("Suggestion store lock poisoned".into())))
    }

    fn load_locked(&self) -> Result<HashMap<String, Vec<String>>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let raw = fs::read(&self.path)?;
        if raw.is_empty() {
            return Ok(HashMap::new());
        }

        let stored: StoredLists = serde_json::from_slice(&raw)?;
        Ok(stored.lists)
    }

    fn persist_locked(&self, lists: &HashMap<String, Vec<String>>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let stored = StoredLists {
            version: CURRENT_VERSION,
            lists: lists.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SuggestionStoreTrait for FileSuggestionStore {
    fn list(&self, kind: SuggestionKind) -> Result<Vec<String>> {
        let _guard = self.guard()?;
        let lists = self.load_locked()?;
        Ok(lists.get(kind.storage_key()).cloned().unwrap_or_default())
    }

    fn save(&self, kind: SuggestionKind, values: &[String]) -> Result<()> {
        let _guard = self.guard()?;
        let mut lists = self.load_locked()?;
        lists.insert(kind.storage_key().to_string(), values.to_vec());
        self.persist_locked(&lists)?;
        debug!(
            "[DeviceStore] Saved {} values under {}",
            values.len(),
            kind.storage_key()
        );
        Ok(())
    }
}
