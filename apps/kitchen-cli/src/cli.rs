//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use kitchen_core::{BillKind, CorporateLineDraft, EventLineDraft};
use std::path::PathBuf;

use crate::commands::{corporate::parse_corporate_item, event::parse_event_item};

#[derive(Debug, Parser)]
#[command(name = "kitchen", version, about = "Cloud kitchen billing: corporate and event invoices")]
pub struct Cli {
    /// Directory holding the billing snapshot [env: KITCHEN_DATA_DIR]
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Corporate (date-wise) bills
    #[command(subcommand)]
    Corporate(CorporateCommand),

    /// Event (package-wise) bills
    #[command(subcommand)]
    Event(EventCommand),

    /// List bills, most recent first
    List {
        /// Only this kind
        kind: Option<BillKind>,
    },

    /// Show one bill in full
    Show { kind: BillKind, id: String },

    /// Delete one bill (its invoice number is not reissued)
    Delete { kind: BillKind, id: String },

    /// Delete every bill and restart invoice numbering at 1
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },

    /// Print an amount in words
    Words {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Compute one line total
    Line {
        #[arg(allow_negative_numbers = true)]
        persons: f64,
        #[arg(allow_negative_numbers = true)]
        unit_price: f64,
    },
}

#[derive(Debug, Subcommand)]
pub enum CorporateCommand {
    /// Create a corporate bill
    Create(CorporateCreateArgs),
    /// Edit an existing corporate bill
    Update(CorporateUpdateArgs),
}

#[derive(Debug, Subcommand)]
pub enum EventCommand {
    /// Create an event bill
    Create(EventCreateArgs),
    /// Edit an existing event bill
    Update(EventUpdateArgs),
}

/// Contact fields shared by both bill kinds.
#[derive(Debug, Clone, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub contact_person: Option<String>,

    /// 10-14 digits
    #[arg(long)]
    pub contact_no: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CorporateCreateArgs {
    /// Corporate client name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub contact_person: String,

    /// 10-14 digits
    #[arg(long)]
    pub contact_no: String,

    /// Billing date (YYYY-MM-DD)
    #[arg(long)]
    pub date: chrono::NaiveDate,

    /// DATE,PACKAGE,PERSONS,UNIT_PRICE (repeatable)
    #[arg(long = "item", value_name = "ITEM", value_parser = parse_corporate_item)]
    pub items: Vec<CorporateLineDraft>,
}

#[derive(Debug, Clone, Args)]
pub struct CorporateUpdateArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub contact: ContactArgs,

    #[arg(long)]
    pub date: Option<chrono::NaiveDate>,

    /// Replaces all line items when given (repeatable)
    #[arg(long = "item", value_name = "ITEM", value_parser = parse_corporate_item)]
    pub items: Vec<CorporateLineDraft>,
}

#[derive(Debug, Clone, Args)]
pub struct EventCreateArgs {
    /// Event name
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub contact_person: String,

    /// 10-14 digits
    #[arg(long)]
    pub contact_no: String,

    /// Event date (YYYY-MM-DD)
    #[arg(long)]
    pub date: chrono::NaiveDate,

    /// NAME,PACKAGE,PERSONS,UNIT_PRICE[,DESCRIPTION] (repeatable)
    #[arg(long = "item", value_name = "ITEM", value_parser = parse_event_item)]
    pub items: Vec<EventLineDraft>,
}

#[derive(Debug, Clone, Args)]
pub struct EventUpdateArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub contact: ContactArgs,

    #[arg(long)]
    pub date: Option<chrono::NaiveDate>,

    /// Replaces all package items when given (repeatable)
    #[arg(long = "item", value_name = "ITEM", value_parser = parse_event_item)]
    pub items: Vec<EventLineDraft>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_corporate_create() {
        let cli = Cli::try_parse_from([
            "kitchen",
            "--json",
            "corporate",
            "create",
            "--name",
            "X Ltd",
            "--contact-person",
            "Rahim",
            "--contact-no",
            "01712345678",
            "--date",
            "2025-01-31",
            "--item",
            "2025-01-02,Economy,3,500",
            "--item",
            "2025-01-03,premium,2,1000",
        ])
        .unwrap();

        assert!(cli.json);
        let Command::Corporate(CorporateCommand::Create(args)) = cli.command else {
            panic!("expected corporate create");
        };
        assert_eq!(args.items.len(), 2);
        assert_eq!(args.items[1].persons, 2);
    }

    #[test]
    fn test_parse_kinds_and_negative_words() {
        let cli = Cli::try_parse_from(["kitchen", "show", "Event", "abc"]).unwrap();
        assert!(matches!(cli.command, Command::Show { kind: BillKind::Event, .. }));

        let cli = Cli::try_parse_from(["kitchen", "words", "-42"]).unwrap();
        assert!(matches!(cli.command, Command::Words { amount } if amount == -42.0));

        assert!(Cli::try_parse_from(["kitchen", "list", "party"]).is_err());
    }

    #[test]
    fn test_bad_item_is_rejected() {
        let result = Cli::try_parse_from([
            "kitchen", "event", "create", "--name", "Gala", "--contact-person", "K",
            "--contact-no", "01812345678", "--date", "2025-02-14", "--item", "Buffet,Gold,10,5",
        ]);
        assert!(result.is_err());
    }
}
