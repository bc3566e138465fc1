//! Stateless calculator commands.

use kitchen_core::calculator::line_total;
use kitchen_core::words::amount_in_words_f64;

use super::{CommandResult, Session};

pub fn words(session: &mut Session<'_>, amount: f64) -> CommandResult {
    let words = amount_in_words_f64(amount);
    if session.json {
        return session.emit_json(&serde_json::json!({ "amount": amount, "words": words }));
    }
    session.line(words)
}

pub fn line(session: &mut Session<'_>, persons: f64, unit_price: f64) -> CommandResult {
    let total = line_total(persons, unit_price);
    if session.json {
        return session.emit_json(&serde_json::json!({
            "persons": persons,
            "unitPrice": unit_price,
            "lineTotal": total,
        }));
    }
    session.line(total.format())
}
