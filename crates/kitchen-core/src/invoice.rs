//! # Invoice Sequencer
//!
//! Maps the shared invoice counter to the human-readable invoice number.
//!
//! ## Counter Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  seq = 1 ──create──► INV-00001 assigned, seq = 2                        │
//! │           ──create──► INV-00002 assigned, seq = 3                       │
//! │           ──delete──► seq stays 3 (numbers are never reused)            │
//! │           ──reset───► seq = 1                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Formatting is pure. Incrementing is the store's job, exactly once per
//! bill-creating operation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed prefix of every invoice number.
pub const INVOICE_PREFIX: &str = "INV-";

/// Minimum digit width; larger counters simply grow wider.
pub const INVOICE_DIGITS: usize = 5;

/// Renders the invoice number for counter value `seq`.
///
/// ```rust
/// use kitchen_core::invoice::next_invoice_no;
///
/// assert_eq!(next_invoice_no(1), "INV-00001");
/// assert_eq!(next_invoice_no(123_456), "INV-123456");
/// ```
pub fn next_invoice_no(seq: u64) -> String {
    format!("{INVOICE_PREFIX}{seq:0width$}", width = INVOICE_DIGITS)
}

/// Counter value an invoice number was issued from, if it has the
/// `INV-<digits>` shape.
///
/// ```rust
/// use kitchen_core::invoice::parse_invoice_no;
///
/// assert_eq!(parse_invoice_no("INV-00042"), Some(42));
/// assert_eq!(parse_invoice_no("Q-7"), None);
/// ```
pub fn parse_invoice_no(invoice_no: &str) -> Option<u64> {
    let digits = invoice_no.trim().strip_prefix(INVOICE_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// The shared, monotonically increasing invoice counter.
///
/// Serialized as a bare integer (`"invoiceSeq": 7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceSeq(u64);

impl InvoiceSeq {
    /// Counter value of a fresh or reset store.
    pub const START: InvoiceSeq = InvoiceSeq(1);

    /// Wraps a raw counter value. Zero is lifted to [`InvoiceSeq::START`].
    pub const fn new(value: u64) -> Self {
        if value == 0 {
            Self::START
        } else {
            InvoiceSeq(value)
        }
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The invoice number the next created bill would receive.
    pub fn invoice_no(&self) -> String {
        next_invoice_no(self.0)
    }

    /// Advances the counter by one.
    #[inline]
    pub fn advance(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Moves the counter past `issued` so that value is never handed out
    /// again. Returns whether the counter moved.
    pub fn raise_past(&mut self, issued: u64) -> bool {
        let floor = issued.saturating_add(1);
        if self.0 >= floor {
            return false;
        }
        self.0 = floor;
        true
    }
}

impl Default for InvoiceSeq {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for InvoiceSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
