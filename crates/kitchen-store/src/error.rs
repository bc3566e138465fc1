//! # Store Error Types
//!
//! Error types for snapshot and storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ├──► persistence hook: logged with warn!, state kept in memory   │
//! │       │                                                                 │
//! │       └──► storage callers (CLI, seed): reported to the operator       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Billing operations themselves never return a `StoreError`: a failed
//! save or load degrades to in-memory behaviour.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Snapshot text could not be encoded or decoded.
    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing the backing medium failed.
    #[error("Storage I/O failed at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Storage keys become file names, so separators and empty keys are
    /// refused.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),
}

impl StoreError {
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Storage {
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
