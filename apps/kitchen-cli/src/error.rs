//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in kitchen-cli                            │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<(), CliError>                                                   │
//! │         │                                                               │
//! │         ├── ValidationErrors ─────────────┐                             │
//! │         ├── CoreError::BillNotFound ──────┤                             │
//! │         ├── StoreError ───────────────────┼──► CliError { code, msg }   │
//! │         └── bad flags / missing --yes ────┘          │                  │
//! │                                                      ▼                  │
//! │                                     stderr + exit code per ErrorCode    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With `--json` the error is printed as
//! `{"code": "NOT_FOUND", "message": "..."}`.

use kitchen_core::{CoreError, ValidationErrors};
use kitchen_store::StoreError;
use serde::Serialize;
use std::process::ExitCode;

/// Error returned from commands.
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes, each with its own process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced bill does not exist
    NotFound,

    /// Draft failed form validation
    ValidationError,

    /// Arguments were well-formed but not acceptable
    InvalidInput,

    /// Storage could not be opened or written
    StorageError,

    /// Configuration could not be resolved
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn exit_status(&self) -> u8 {
        match self {
            ErrorCode::Internal => 1,
            ErrorCode::InvalidInput => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::ValidationError => 4,
            ErrorCode::StorageError => 5,
            ErrorCode::ConfigError => 6,
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::InvalidInput, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ConfigError, message)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code.exit_status())
    }
}

/// Converts validation failures, one line per field.
impl From<ValidationErrors> for CliError {
    fn from(errors: ValidationErrors) -> Self {
        let lines: Vec<String> = errors.iter().map(|e| format!("  - {e}")).collect();
        CliError::new(
            ErrorCode::ValidationError,
            format!("Bill is not valid:\n{}", lines.join("\n")),
        )
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BillNotFound { kind, id } => {
                CliError::new(ErrorCode::NotFound, format!("Bill not found: {kind} {id}"))
            }
            CoreError::Validation(errors) => errors.into(),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidKey(key) => {
                CliError::config(format!("KITCHEN_STORAGE_KEY '{key}' is not a usable storage key"))
            }
            StoreError::Storage { .. } => CliError::new(ErrorCode::StorageError, err.to_string()),
            StoreError::Serialization(e) => {
                tracing::error!(error = %e, "Snapshot serialization failed");
                CliError::new(ErrorCode::Internal, "Could not serialize billing state")
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::Internal, format!("Could not write output: {err}"))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::new(ErrorCode::Internal, format!("JSON output failed: {err}"))
    }
}
