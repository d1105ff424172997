// SPDX-License-Identifier: MPL-2.0
//! Client-side persistent key/value storage.
//!
//! This is the portal's equivalent of browser `localStorage`: string keys to
//! string values, written through to a CBOR file on every change so values
//! survive restarts. The locale resolver, the session-token helpers and the
//! request signer all share one [`ClientStorage`] handle.
//!
//! # Path Resolution
//!
//! 1. Use [`ClientStorage::open`] with an explicit base directory
//! 2. Set `PORTAL_FRONT_DATA_DIR` environment variable
//! 3. Falls back to platform-specific data directory

use super::paths;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Storage file name within the app data directory.
pub const STORAGE_FILE: &str = "storage.cbor";

/// Key holding the bearer access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Key holding the last locale accepted by the navigation guard. The request
/// signer reads the same key for `Accept-Language`.
pub const LOCALE_KEY: &str = "user-locale";

#[derive(Debug, Default)]
struct StorageState {
    items: BTreeMap<String, String>,
    path: Option<PathBuf>,
}

/// Shared handle to the client storage. Clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct ClientStorage {
    inner: Arc<RwLock<StorageState>>,
}

impl ClientStorage {
    /// Storage that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the storage file in the data directory.
    ///
    /// Returns a tuple of (storage, optional_warning). An unreadable or
    /// corrupted file yields empty storage and a warning key; the next write
    /// replaces the file.
    pub fn open(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        match paths::get_app_data_dir_with_override(base_dir) {
            Some(mut path) => {
                path.push(STORAGE_FILE);
                Self::open_at(path)
            }
            None => (
                Self::in_memory(),
                Some("notification-storage-path-error".to_string()),
            ),
        }
    }

    /// Opens (or prepares to create) storage backed by a specific file.
    pub fn open_at(path: PathBuf) -> (Self, Option<String>) {
        let (items, warning) = if path.exists() {
            match read_items(&path) {
                Ok(items) => (items, None),
                Err(Error::Storage(_)) => (
                    BTreeMap::new(),
                    Some("notification-storage-parse-error".to_string()),
                ),
                Err(_) => (
                    BTreeMap::new(),
                    Some("notification-storage-read-error".to_string()),
                ),
            }
        } else {
            (BTreeMap::new(), None)
        };

        let storage = Self {
            inner: Arc::new(RwLock::new(StorageState {
                items,
                path: Some(path),
            })),
        };
        (storage, warning)
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<PathBuf> {
        self.read_state(|state| state.path.clone())
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        self.read_state(|state| state.items.get(key).cloned())
    }

    /// Stores a value and writes the file through.
    ///
    /// The in-memory value is updated even when the write fails.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.write_state(|state| {
            state.items.insert(key.to_string(), value.to_string());
        })
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.write_state(|state| {
            state.items.remove(key);
        })
    }

    pub fn clear(&self) -> Result<()> {
        self.write_state(|state| state.items.clear())
    }

    pub fn len(&self) -> usize {
        self.read_state(|state| state.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_state<T>(&self, f: impl FnOnce(&StorageState) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write_state(&self, f: impl FnOnce(&mut StorageState)) -> Result<()> {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
        match &guard.path {
            Some(path) => write_items(path, &guard.items),
            None => Ok(()),
        }
    }
}

fn read_items(path: &Path) -> Result<BTreeMap<String, String>> {
    let file = fs::File::open(path)?;
    let items = ciborium::from_reader(BufReader::new(file))?;
    Ok(items)
}

fn write_items(path: &Path, items: &BTreeMap<String, String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(fs::File::create(path)?);
    ciborium::into_writer(items, &mut writer)?;
    writer.flush()?;
    Ok(())
}
