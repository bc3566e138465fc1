//! # Line-Item Calculator
//!
//! Per-line and per-bill arithmetic.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  persons × unit_price ──► clamp_money ──► line_total   (per row)        │
//! │                                                                         │
//! │  Σ stored line_total  ──► clamp_money ──► grand_total  (per bill)       │
//! │  Σ persons            ─────────────────► total_persons                  │
//! │  grand_total          ──► amount_in_words                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The aggregate sums the *stored* line totals rather than recomputing
//! them; the normalizer re-clamps the sum either way.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{clamp_money, Money};
use crate::types::LineItem;
use crate::words::amount_in_words;

/// Everything the bill header derives from its line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillTotals {
    pub grand_total: Money,
    #[ts(type = "number")]
    pub total_persons: u64,
    pub amount_in_words: String,
}

/// Line total from raw form input.
///
/// Non-finite persons or prices count as zero.
///
/// ```rust
/// use kitchen_core::calculator::line_total;
///
/// assert_eq!(line_total(3.0, 500.0).units(), 1500);
/// assert_eq!(line_total(f64::NAN, 500.0).units(), 0);
/// assert_eq!(line_total(2.0, 99.75).units(), 200);
/// ```
pub fn line_total(persons: f64, unit_price: f64) -> Money {
    let persons = if persons.is_finite() { persons } else { 0.0 };
    let unit_price = if unit_price.is_finite() { unit_price } else { 0.0 };
    clamp_money(persons * unit_price)
}

/// Money-normalized sum of each item's stored line total.
pub fn aggregate_total<I: LineItem>(items: &[I]) -> Money {
    let sum: Money = items.iter().map(|it| it.line_total()).sum();
    Money::from_units(sum.units())
}

/// Sum of each item's person count.
pub fn total_persons<I: LineItem>(items: &[I]) -> u64 {
    items.iter().map(|it| u64::from(it.persons())).sum()
}

/// Grand total, person count and amount in words in one pass.
pub fn compute_aggregate<I: LineItem>(items: &[I]) -> BillTotals {
    let grand_total = aggregate_total(items);
    BillTotals {
        grand_total,
        total_persons: total_persons(items),
        amount_in_words: amount_in_words(grand_total.units()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
