//! # Commands
//!
//! One handler per subcommand. Handlers validate, call the store and
//! print; they never touch storage directly.
//!
//! ```text
//! commands/
//! ├── mod.rs        ◄─── Session + dispatch
//! ├── corporate.rs  ◄─── corporate create / update, item parsing
//! ├── event.rs      ◄─── event create / update, item parsing
//! ├── bills.rs      ◄─── list / show / delete / reset
//! └── calc.rs       ◄─── words / line
//! ```

pub mod bills;
pub mod calc;
pub mod corporate;
pub mod event;

use kitchen_core::Bill;
use kitchen_store::BillingStore;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::cli::{Command, CorporateCommand, EventCommand};
use crate::error::CliError;
use crate::render;

/// Result type for command handlers.
pub type CommandResult = Result<(), CliError>;

/// What every handler works against.
pub struct Session<'a> {
    pub store: &'a mut BillingStore,
    pub json: bool,
    pub out: &'a mut dyn Write,
}

impl Session<'_> {
    /// Prints `value` as pretty JSON.
    pub fn emit_json<T: Serialize + ?Sized>(&mut self, value: &T) -> CommandResult {
        let text = serde_json::to_string_pretty(value)?;
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    /// Prints one line of text.
    pub fn line(&mut self, text: impl std::fmt::Display) -> CommandResult {
        writeln!(self.out, "{text}")?;
        Ok(())
    }
}

/// Routes a parsed command to its handler.
pub fn dispatch(session: &mut Session<'_>, command: Command) -> CommandResult {
    match command {
        Command::Corporate(CorporateCommand::Create(args)) => corporate::create(session, args),
        Command::Corporate(CorporateCommand::Update(args)) => corporate::update(session, args),
        Command::Event(EventCommand::Create(args)) => event::create(session, args),
        Command::Event(EventCommand::Update(args)) => event::update(session, args),
        Command::List { kind } => bills::list(session, kind),
        Command::Show { kind, id } => bills::show(session, kind, &id),
        Command::Delete { kind, id } => bills::delete(session, kind, &id),
        Command::Reset { yes } => bills::reset(session, yes),
        Command::Words { amount } => calc::words(session, amount),
        Command::Line {
            persons,
            unit_price,
        } => calc::line(session, persons, unit_price),
    }
}

// =============================================================================
// Shared Helpers
// =============================================================================

pub(crate) fn parse_persons(raw: &str) -> Result<u32, String> {
    raw.parse()
        .map_err(|_| format!("persons '{raw}' is not a whole number"))
}

/// Unit prices are kept as entered; only line totals are normalized.
pub(crate) fn parse_price(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(format!("unit price '{raw}' is not a number")),
    }
}

pub(crate) fn print_saved(session: &mut Session<'_>, verb: &str, bill: Bill) -> CommandResult {
    if session.json {
        return session.emit_json(&bill);
    }
    session.line(format!(
        "{verb} {} bill {}",
        bill.kind(),
        bill.header().invoice_no
    ))?;
    session.line(render::bill_detail(&bill))
}

/// Update on an unknown id changes nothing and says so.
pub(crate) fn report_missing(session: &mut Session<'_>, id: &str) -> CommandResult {
    debug!(id, "Update target not found");
    if session.json {
        return session.emit_json(&serde_json::json!({ "updated": false, "id": id }));
    }
    session.line(format!("No bill with id {id}; nothing was changed"))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Runs `command` against `store`, returning what it printed.
    pub fn run(store: &mut BillingStore, json: bool, command: Command) -> (CommandResult, String) {
        let mut out = Vec::new();
        let result = {
            let mut session = Session {
                store,
                json,
                out: &mut out,
            };
            dispatch(&mut session, command)
        };
        (result, String::from_utf8(out).unwrap())
    }
}
