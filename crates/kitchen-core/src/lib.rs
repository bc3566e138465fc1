//! # kitchen-core: Pure Billing Logic for Cloud Kitchen Billing
//!
//! This crate is the **heart** of the billing system. It turns line items
//! into totals, totals into a legally readable amount string, and counters
//! into invoice numbers. Everything here is a pure function over plain data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cloud Kitchen Billing Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Form Layer (kitchen-cli / UI)                   │   │
//! │  │    Corporate form ──► Event form ──► Bill list ──► Bill detail │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ drafts                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kitchen-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────────┐   │   │
//! │  │   │  money   │ │  words   │ │ invoice  │ │   calculator   │   │   │
//! │  │   │ clamp    │ │ Crore    │ │ INV-0001 │ │ line/aggregate │   │   │
//! │  │   │ format   │ │ Lakh     │ │          │ │                │   │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └────────────────┘   │   │
//! │  │   ┌──────────┐ ┌──────────────┐                               │   │
//! │  │   │  types   │ │  validation  │                               │   │
//! │  │   └──────────┘ └──────────────┘                               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO LOGGING • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ assembled bills                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                kitchen-store (Billing Store)                    │   │
//! │  │        BillingState, create/update/delete, snapshots            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money Normalizer (`clamp_money`, `format_money`)
//! - [`words`] - Numeral-to-Words Renderer (South-Asian grouping)
//! - [`invoice`] - Invoice Sequencer
//! - [`calculator`] - Line-Item Calculator
//! - [`types`] - Line items, bills, drafts
//! - [`validation`] - Form-layer validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use kitchen_core::calculator::line_total;
//! use kitchen_core::words::amount_in_words;
//!
//! let first = line_total(3.0, 500.0);
//! let second = line_total(2.0, 1000.0);
//! let grand_total = first + second;
//!
//! assert_eq!(grand_total.units(), 3500);
//! assert_eq!(
//!     amount_in_words(grand_total.units()),
//!     "BDT Three Thousand Five Hundred Only"
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod invoice;
pub mod money;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::BillTotals;
pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use invoice::InvoiceSeq;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency code used as the prefix of amount-in-words strings and the
/// suffix of formatted money.
pub const CURRENCY_CODE: &str = "BDT";

/// Contact numbers are plain digit strings within this length range.
pub const CONTACT_NO_MIN_DIGITS: usize = 10;

/// See [`CONTACT_NO_MIN_DIGITS`].
pub const CONTACT_NO_MAX_DIGITS: usize = 14;
