//! # Persistence Hook
//!
//! The side effect the store runs after every mutation, injected at
//! construction instead of subscribed globally.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BillingStore::open(hook)   ── hook.load()  ──► restore or start empty │
//! │  create / update / delete / reset                                       │
//! │       └── state mutated in memory                                       │
//! │       └── hook.save(snapshot) ── Err? warn! and carry on               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::error::StoreResult;
use crate::state::SerializedState;
use crate::storage::{KeyValueStorage, StorageConfig};

/// Loads the snapshot once at startup and saves it after each mutation.
///
/// Errors are reported to the store, which logs and swallows them.
pub trait PersistHook {
    /// `Ok(None)` when there is no prior state.
    fn load(&self) -> StoreResult<Option<SerializedState>>;

    fn save(&self, snapshot: &SerializedState) -> StoreResult<()>;
}

/// Keeps nothing; every process starts empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPersistence;

impl PersistHook for NoPersistence {
    fn load(&self) -> StoreResult<Option<SerializedState>> {
        Ok(None)
    }

    fn save(&self, _snapshot: &SerializedState) -> StoreResult<()> {
        Ok(())
    }
}

/// Writes the snapshot under one key of a [`KeyValueStorage`].
pub struct SnapshotPersistence {
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl SnapshotPersistence {
    pub fn new(storage: Box<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        SnapshotPersistence {
            storage,
            key: key.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> StoreResult<Self> {
        Ok(Self::new(config.open()?, config.storage_key.clone()))
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PersistHook for SnapshotPersistence {
    fn load(&self) -> StoreResult<Option<SerializedState>> {
        let text = self.storage.get(&self.key)?;
        debug!(key = %self.key, found = text.is_some(), "Loaded snapshot");
        Ok(text.map(SerializedState::from))
    }

    fn save(&self, snapshot: &SerializedState) -> StoreResult<()> {
        self.storage.set(&self.key, snapshot.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_snapshot_persistence_uses_its_key() {
        let storage = MemoryStorage::new();
        let hook = SnapshotPersistence::new(Box::new(storage.clone()), "billing");

        assert_eq!(hook.load().unwrap(), None);

        hook.save(&SerializedState::new("{}")).unwrap();
        assert_eq!(storage.get("billing").unwrap().as_deref(), Some("{}"));
        assert_eq!(hook.load().unwrap(), Some(SerializedState::new("{}")));
    }

    #[test]
    fn test_no_persistence() {
        let hook = NoPersistence;
        hook.save(&SerializedState::new("{}")).unwrap();
        assert_eq!(hook.load().unwrap(), None);
    }
}
