//! # Money Module
//!
//! The Money Normalizer: every monetary value in the system is a
//! non-negative whole number of taka.
//!
//! ## Normalization Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  clamp_money(value)                                                     │
//! │                                                                         │
//! │    NaN / ±∞          ──► 0                                              │
//! │    -250.0            ──► 0        (negative floors at zero)             │
//! │    1499.5            ──► 1500     (rounded to the nearest unit)         │
//! │    3500.0            ──► 3500                                           │
//! │                                                                         │
//! │  Invalid input never fails, it degrades to zero so that all            │
//! │  downstream arithmetic stays total.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kitchen_core::money::{clamp_money, format_money, Money};
//!
//! assert_eq!(clamp_money(f64::NAN), Money::zero());
//! assert_eq!(clamp_money(1499.5).units(), 1500);
//! assert_eq!(format_money(1234567.0), "1,234,567 BDT");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::CURRENCY_CODE;

// =============================================================================
// Money Type
// =============================================================================

/// A non-negative amount in whole currency units.
///
/// ## Design Decisions
/// - **i64 inside, never negative**: every constructor floors at zero
/// - **Saturating arithmetic**: sums never wrap, they pin at `i64::MAX`
/// - **Lenient deserialization**: stored numbers (integer or float) pass
///   through [`clamp_money`], so a hand-edited snapshot cannot smuggle in a
///   negative or fractional amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Creates money from whole units, flooring negatives at zero.
    ///
    /// ```rust
    /// use kitchen_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(500).units(), 500);
    /// assert_eq!(Money::from_units(-20).units(), 0);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        if units < 0 {
            Money(0)
        } else {
            Money(units)
        }
    }

    /// Normalizes an arbitrary number. See [`clamp_money`].
    pub fn clamp(value: f64) -> Self {
        if !value.is_finite() {
            return Money::zero();
        }
        // `as` saturates for values beyond the i64 range
        Money::from_units(value.round() as i64)
    }

    /// Returns the amount in whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Renders the amount with thousands separators and the currency suffix.
    pub fn format(&self) -> String {
        format!("{} {}", group_thousands(self.0), CURRENCY_CODE)
    }
}

// =============================================================================
// Free Functions
// =============================================================================

/// Clamps and rounds any numeric input to a non-negative integer amount.
///
/// Non-finite input yields zero; negative results become zero.
#[inline]
pub fn clamp_money(value: f64) -> Money {
    Money::clamp(value)
}

/// Normalizes `value` and renders it as `"1,234 BDT"`.
pub fn format_money(value: f64) -> String {
    clamp_money(value).format()
}

/// Inserts `,` every three digits from the right (en-US grouping).
fn group_thousands(units: i64) -> String {
    let digits = units.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MoneyVisitor;

        impl<'de> Visitor<'de> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a numeric amount")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                Ok(Money::from_units(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                Ok(Money::from_units(i64::try_from(v).unwrap_or(i64::MAX)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                Ok(Money::clamp(v))
            }

            // Snapshots carry `null` where an amount was NaN when written.
            fn visit_unit<E: de::Error>(self) -> Result<Money, E> {
                Ok(Money::zero())
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_non_finite_is_zero() {
        assert_eq!(clamp_money(f64::NAN), Money::zero());
        assert_eq!(clamp_money(f64::INFINITY), Money::zero());
        assert_eq!(clamp_money(f64::NEG_INFINITY), Money::zero());
    }

    #[test]
    fn test_clamp_rounds_and_floors() {
        assert_eq!(clamp_money(1499.5).units(), 1500);
        assert_eq!(clamp_money(1499.4).units(), 1499);
        assert_eq!(clamp_money(-0.4).units(), 0);
        assert_eq!(clamp_money(-250.0).units(), 0);
        assert_eq!(clamp_money(1e300).units(), i64::MAX);
    }

    #[test]
    fn test_clamp_is_non_negative_and_idempotent() {
        for x in [-1e9, -3.7, -0.0, 0.0, 0.49, 0.5, 7.25, 999.999, 12345678.9] {
            let once = clamp_money(x);
            assert!(once.units() >= 0, "clamp({x}) went negative");
            assert_eq!(clamp_money(once.units() as f64), once);
        }
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0 BDT");
        assert_eq!(format_money(999.0), "999 BDT");
        assert_eq!(format_money(3500.0), "3,500 BDT");
        assert_eq!(format_money(1234567.0), "1,234,567 BDT");
        assert_eq!(format_money(-10.0), "0 BDT");
        assert_eq!(format_money(f64::NAN), "0 BDT");
    }

    #[test]
    fn test_arithmetic_saturates() {
        let a = Money::from_units(1500);
        let b = Money::from_units(2000);
        assert_eq!((a + b).units(), 3500);

        let max = Money::from_units(i64::MAX);
        assert_eq!((max + a).units(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_units).sum();
        assert_eq!(total.units(), 600);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let parse = |s: &str| serde_json::from_str::<Money>(s).unwrap();
        assert_eq!(parse("3500").units(), 3500);
        assert_eq!(parse("-40").units(), 0);
        assert_eq!(parse("99.6").units(), 100);
        assert_eq!(parse("null").units(), 0);
        assert!(serde_json::from_str::<Money>("\"abc\"").is_err());
    }

    #[test]
    fn test_serializes_as_plain_integer() {
        assert_eq!(serde_json::to_string(&Money::from_units(42)).unwrap(), "42");
    }
}
