//! # kitchen-store: Billing Store for Cloud Kitchen Billing
//!
//! Owns the corporate and event bill collections plus the shared invoice
//! counter, and keeps a JSON snapshot of them in durable storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cloud Kitchen Billing Data Flow                     │
//! │                                                                         │
//! │  kitchen-cli command (corporate create)                                │
//! │       │ validated draft                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  kitchen-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ BillingStore  │    │ PersistHook   │    │   Storage    │  │   │
//! │  │   │  (store.rs)   │───►│(persistence.rs│───►│ (storage.rs) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ BillingState  │    │ Snapshot      │    │ FileStorage  │  │   │
//! │  │   │ create/update │    │ NoPersistence │    │ MemoryStorage│  │   │
//! │  │   │ delete/reset  │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   <data dir>/cloud_kitchen_billing_state_v1.json               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The billing store and its operations
//! - [`state`] - Billing state and snapshot encoding
//! - [`persistence`] - The save-after-mutation hook
//! - [`storage`] - Key-value storage backends
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kitchen_store::{BillingStore, StorageConfig};
//!
//! let config = StorageConfig::new("./data");
//! let store = BillingStore::from_config(&config)?;
//! println!("next invoice: {}", store.peek_next_invoice_no());
//! # Ok::<(), kitchen_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod persistence;
pub mod state;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use persistence::{NoPersistence, PersistHook, SnapshotPersistence};
pub use state::{BillingState, SerializedState, StoredBill};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageConfig, DEFAULT_STORAGE_KEY};
pub use store::{BillingStore, MutationOutcome};
