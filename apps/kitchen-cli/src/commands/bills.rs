//! Commands that work on stored bills of either kind.

use kitchen_core::BillKind;
use kitchen_store::MutationOutcome;

use super::{CommandResult, Session};
use crate::error::CliError;
use crate::render;

pub fn list(session: &mut Session<'_>, kind: Option<BillKind>) -> CommandResult {
    let bills = session.store.list(kind);
    if session.json {
        return session.emit_json(&bills);
    }
    if bills.is_empty() {
        return session.line("No bills yet");
    }
    for bill in &bills {
        session.line(render::bill_summary(bill))?;
    }
    session.line(format!(
        "{} bill(s), next invoice {}",
        bills.len(),
        session.store.peek_next_invoice_no()
    ))
}

pub fn show(session: &mut Session<'_>, kind: BillKind, id: &str) -> CommandResult {
    let bill = session.store.require(kind, id)?;
    if session.json {
        return session.emit_json(&bill);
    }
    session.line(render::bill_detail(&bill))
}

pub fn delete(session: &mut Session<'_>, kind: BillKind, id: &str) -> CommandResult {
    let outcome = session.store.delete(kind, id);
    let deleted = outcome.is_applied();
    if session.json {
        return session.emit_json(&serde_json::json!({ "deleted": deleted, "id": id }));
    }
    match outcome {
        MutationOutcome::Applied => session.line(format!("Deleted {kind} bill {id}")),
        MutationOutcome::NotFound => {
            session.line(format!("No {kind} bill with id {id}; nothing was deleted"))
        }
    }
}

pub fn reset(session: &mut Session<'_>, yes: bool) -> CommandResult {
    if !yes {
        return Err(CliError::invalid_input(
            "reset deletes every bill; pass --yes to confirm",
        ));
    }
    let removed = session.store.state().bill_count();
    session.store.reset();

    if session.json {
        return session.emit_json(&serde_json::json!({ "reset": true, "removed": removed }));
    }
    session.line(format!("Removed {removed} bill(s); invoice numbering restarts at INV-00001"))
}

#[cfg(test)]
mod tests {
    use crate::cli::Command;
    use crate::commands::test_support::run;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use kitchen_core::{
        BillKind, CorporateDraft, CorporateLineDraft, EventDraft, EventLineDraft,
        PackageType,
    };
    use kitchen_store::BillingStore;

    fn seeded() -> (BillingStore, String, String) {
        let day = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let mut store = BillingStore::new();
        let corporate = store.create_corporate(CorporateDraft {
            corporate_name: "X Ltd".to_string(),
            contact_person: "Rahim".to_string(),
            contact_no: "01712345678".to_string(),
            billing_date: day,
            line_items: vec![CorporateLineDraft {
                id: None,
                service_date: day,
                package_type: PackageType::Economy,
                persons: 3,
                unit_price: 500.0,
            }],
        });
        let event = store.create_event(EventDraft {
            event_name: "Gala".to_string(),
            contact_person: "Karim".to_string(),
            contact_no: "01812345678".to_string(),
            event_date: day,
            items: vec![EventLineDraft {
                id: None,
                package_name: "Buffet".to_string(),
                package_type: PackageType::Standard,
                description: String::new(),
                persons: 10,
                unit_price: 850.0,
            }],
        });
        (store, corporate.header.id, event.header.id)
    }

    #[test]
    fn test_list_text_and_json() {
        let (mut store, _, _) = seeded();

        let (result, out) = run(&mut store, false, Command::List { kind: None });
        result.unwrap();
        assert!(out.contains("INV-00001"));
        assert!(out.contains("INV-00002"));
        assert!(out.contains("next invoice INV-00003"));

        let (result, out) = run(&mut store, true, Command::List { kind: Some(BillKind::Event) });
        result.unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["eventName"], "Gala");
    }

    #[test]
    fn test_list_empty() {
        let mut store = BillingStore::new();
        let (result, out) = run(&mut store, false, Command::List { kind: None });
        result.unwrap();
        assert!(out.contains("No bills yet"));
    }

    #[test]
    fn test_show_unknown_is_not_found() {
        let (mut store, corporate_id, _) = seeded();

        // Right id, wrong collection.
        let (result, _) = run(
            &mut store,
            false,
            Command::Show {
                kind: BillKind::Event,
                id: corporate_id.clone(),
            },
        );
        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.starts_with("Bill not found"));

        let (result, out) = run(
            &mut store,
            false,
            Command::Show {
                kind: BillKind::Corporate,
                id: corporate_id,
            },
        );
        result.unwrap();
        assert!(out.contains("X Ltd"));
    }

    #[test]
    fn test_delete_reports_outcome() {
        let (mut store, _, event_id) = seeded();

        let (result, out) = run(
            &mut store,
            true,
            Command::Delete {
                kind: BillKind::Event,
                id: event_id.clone(),
            },
        );
        result.unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["deleted"], true);
        assert!(store.event_bills().is_empty());

        let (result, out) = run(
            &mut store,
            false,
            Command::Delete {
                kind: BillKind::Event,
                id: event_id,
            },
        );
        result.unwrap();
        assert!(out.contains("nothing was deleted"));
        assert_eq!(store.peek_next_invoice_no(), "INV-00003");
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let (mut store, _, _) = seeded();

        let (result, _) = run(&mut store, false, Command::Reset { yes: false });
        assert_eq!(result.unwrap_err().code, ErrorCode::InvalidInput);
        assert_eq!(store.state().bill_count(), 2);

        let (result, out) = run(&mut store, false, Command::Reset { yes: true });
        result.unwrap();
        assert!(out.contains("Removed 2 bill(s)"));
        assert!(store.state().is_empty());
        assert_eq!(store.peek_next_invoice_no(), "INV-00001");
    }
}
