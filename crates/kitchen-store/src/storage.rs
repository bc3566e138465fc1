//! # Key-Value Storage
//!
//! The durable area snapshots are written to.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      KeyValueStorage                                    │
//! │                                                                         │
//! │  StorageConfig::new(dir)    ──► FileStorage                            │
//! │    <dir>/<key>.json               write <key>.json.tmp, then rename    │
//! │                                                                         │
//! │  StorageConfig::in_memory() ──► MemoryStorage                          │
//! │    HashMap<key, value>            clones share the same map            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are opaque strings; the store decides what goes in them.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Storage key of the billing snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "cloud_kitchen_billing_state_v1";

// =============================================================================
// Storage Trait
// =============================================================================

/// A flat string-to-string area.
pub trait KeyValueStorage {
    /// `Ok(None)` when nothing was stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removing an absent key succeeds.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

fn check_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\'])
        && !key.chars().any(char::is_control);
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// One JSON file per key under a data directory.
///
/// The directory is created on first write. Writes go to a sibling temp
/// file that is renamed over the target, so a crash mid-write leaves the
/// previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        check_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::storage(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::storage(&self.dir, e))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| StoreError::storage(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::storage(&path, e))?;

        debug!(path = %path.display(), bytes = value.len(), "Wrote storage key");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::storage(path, e)),
        }
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// Process-local storage. Cloned handles see the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // Single-writer use; a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        check_key(key)?;
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        check_key(key)?;
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        check_key(key)?;
        self.entries().remove(key);
        Ok(())
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Where and under which key the store keeps its snapshot.
///
/// ## Example
/// ```rust
/// use kitchen_store::StorageConfig;
///
/// let config = StorageConfig::new("/var/lib/kitchen").key("billing_test");
/// assert_eq!(config.storage_key, "billing_test");
///
/// let config = StorageConfig::in_memory();
/// assert!(config.data_dir.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory for [`FileStorage`]; `None` selects [`MemoryStorage`].
    pub data_dir: Option<PathBuf>,

    /// Default: [`DEFAULT_STORAGE_KEY`]
    pub storage_key: String,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StorageConfig {
            data_dir: Some(data_dir.into()),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Storage that lives only as long as the process (for testing).
    pub fn in_memory() -> Self {
        StorageConfig {
            data_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Sets the storage key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Opens the configured backend after checking the key.
    pub fn open(&self) -> StoreResult<Box<dyn KeyValueStorage>> {
        check_key(&self.storage_key)?;
        Ok(match &self.data_dir {
            Some(dir) => Box::new(FileStorage::new(dir.clone())),
            None => Box::new(MemoryStorage::new()),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
