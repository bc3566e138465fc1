//! # Amount in Words
//!
//! Renders an integer amount as the written-out sentence printed on every
//! bill, using the South-Asian scale (crore / lakh / thousand / hundred).
//!
//! ## Decomposition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1,23,45,678                                                            │
//! │    │  │  │ └── hundreds group (0-999)   → "Six Hundred Seventy Eight"  │
//! │    │  │  └──── thousand group (0-99)    → "Forty Five Thousand"        │
//! │    │  └─────── lakh group (0-99)        → "Twenty Three Lakh"          │
//! │    └────────── crore count              → "One Crore"                  │
//! │                                                                         │
//! │  BDT One Crore Twenty Three Lakh Forty Five Thousand Six Hundred       │
//! │  Seventy Eight Only                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Zero-valued groups contribute nothing. The sign is carried as a flag
//! through the renderer, so negative amounts come out as
//! `"BDT Minus Forty Two Only"` without any post-editing of the text.
//!
//! A crore count of 1000 or more is itself spelled with the same scale
//! (`10,000,000,000` → `"One Thousand Crore"`), which keeps the renderer
//! total over the whole `i64` range.
//!
//! This intentionally departs from the legacy three-digit rendering, which
//! printed the same amount as `"Ten Hundred Crore"`. Stored
//! `amountInWords` strings from that era will not match a re-render for
//! amounts of 1000 crore and above.

use crate::CURRENCY_CODE;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

pub const CRORE: u64 = 10_000_000;
pub const LAKH: u64 = 100_000;
pub const THOUSAND: u64 = 1_000;

/// Renders `n` as `"<CUR> … Only"`.
///
/// ## Example
/// ```rust
/// use kitchen_core::words::amount_in_words;
///
/// assert_eq!(amount_in_words(0), "BDT Zero Only");
/// assert_eq!(amount_in_words(-42), "BDT Minus Forty Two Only");
/// assert_eq!(
///     amount_in_words(1_234_567),
///     "BDT Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven Only"
/// );
/// ```
pub fn amount_in_words(n: i64) -> String {
    let magnitude = n.unsigned_abs();
    if magnitude == 0 {
        return format!("{CURRENCY_CODE} Zero Only");
    }

    let mut words = Vec::with_capacity(16);
    if n < 0 {
        words.push("Minus");
    }
    push_scaled(&mut words, magnitude);

    format!("{CURRENCY_CODE} {} Only", words.join(" "))
}

/// Like [`amount_in_words`] for raw numeric input.
///
/// The value is truncated toward zero; NaN and infinities count as zero.
pub fn amount_in_words_f64(value: f64) -> String {
    if !value.is_finite() {
        return amount_in_words(0);
    }
    amount_in_words(value.trunc() as i64)
}

fn push_scaled(words: &mut Vec<&'static str>, n: u64) {
    let crore = n / CRORE;
    let rest = n % CRORE;
    let lakh = rest / LAKH;
    let rest = rest % LAKH;
    let thousand = rest / THOUSAND;
    let hundreds = rest % THOUSAND;

    if crore > 0 {
        if crore < THOUSAND {
            push_three_digits(words, crore);
        } else {
            push_scaled(words, crore);
        }
        words.push("Crore");
    }
    if lakh > 0 {
        push_three_digits(words, lakh);
        words.push("Lakh");
    }
    if thousand > 0 {
        push_three_digits(words, thousand);
        words.push("Thousand");
    }
    push_three_digits(words, hundreds);
}

/// `x` must be below 1000.
fn push_three_digits(words: &mut Vec<&'static str>, x: u64) {
    debug_assert!(x < THOUSAND);
    let hundred = (x / 100) as usize;
    if hundred > 0 {
        words.push(ONES[hundred]);
        words.push("Hundred");
    }
    push_two_digits(words, x % 100);
}

fn push_two_digits(words: &mut Vec<&'static str>, x: u64) {
    let x = x as usize;
    match x {
        0 => {}
        1..=19 => words.push(ONES[x]),
        _ => {
            words.push(TENS[x / 10]);
            if x % 10 != 0 {
                words.push(ONES[x % 10]);
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
