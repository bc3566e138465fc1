//! # Error Types
//!
//! Domain-specific error types for kitchen-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kitchen-core errors (this file)                                       │
//! │  ├── CoreError         - Lookup misses, wrapped validation failures    │
//! │  ├── ValidationErrors  - Every failed field of one draft               │
//! │  └── ValidationError   - A single field failure                        │
//! │                                                                         │
//! │  kitchen-store errors (separate crate)                                 │
//! │  └── StoreError        - Snapshot / storage failures (never escape     │
//! │                          the persistence hook)                          │
//! │                                                                         │
//! │  kitchen-cli errors (in app)                                           │
//! │  └── CliError          - What the operator sees                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Money, persons and amount-in-words inputs never produce errors: they
//! are normalized to zero instead.

use thiserror::Error;

use crate::types::BillKind;

// =============================================================================
// Core Error
// =============================================================================

#[derive(Debug, Error)]
pub enum CoreError {
    /// A bill id the caller referenced is not in its collection.
    #[error("{kind} bill not found: {id}")]
    BillNotFound { kind: BillKind, id: String },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

// =============================================================================
// Validation Error
// =============================================================================

/// One field that failed a form rule.
///
/// `field` is the form key, e.g. `contactNo` or `persons_1` for the second
/// line item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("At least 1 {what} is required")]
    Empty { field: String, what: String },
}

impl ValidationError {
    /// The form key this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::Empty { field, .. } => field,
        }
    }
}

/// All failures found while validating one draft, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", summarize(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// First error recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field() == field)
    }

    /// `Ok(())` when nothing failed.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
