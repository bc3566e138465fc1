//! Corporate bill commands.

use kitchen_core::validation::validate_corporate_draft;
use kitchen_core::{Bill, BillDraft, BillKind, BillRecord, CorporateDraft, CorporateLineDraft, PackageType};

use super::{parse_persons, parse_price, print_saved, report_missing, CommandResult, Session};
use crate::cli::{CorporateCreateArgs, CorporateUpdateArgs};

/// Parses `DATE,PACKAGE,PERSONS,UNIT_PRICE`, e.g. `2025-01-02,Economy,3,500`.
pub fn parse_corporate_item(raw: &str) -> Result<CorporateLineDraft, String> {
    let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [date, package, persons, unit_price] = fields.as_slice() else {
        return Err(format!(
            "expected DATE,PACKAGE,PERSONS,UNIT_PRICE, got '{raw}'"
        ));
    };

    Ok(CorporateLineDraft {
        id: None,
        service_date: date
            .parse()
            .map_err(|e| format!("service date '{date}': {e}"))?,
        package_type: package.parse::<PackageType>()?,
        persons: parse_persons(persons)?,
        unit_price: parse_price(unit_price)?,
    })
}

pub fn create(session: &mut Session<'_>, args: CorporateCreateArgs) -> CommandResult {
    let draft = CorporateDraft {
        corporate_name: args.name,
        contact_person: args.contact_person,
        contact_no: args.contact_no,
        billing_date: args.date,
        line_items: args.items,
    };
    validate_corporate_draft(&draft)?;

    let bill = session.store.create_corporate(draft);
    print_saved(session, "Created", bill.into())
}

pub fn update(session: &mut Session<'_>, args: CorporateUpdateArgs) -> CommandResult {
    let Some(Bill::Corporate(existing)) = session.store.find(BillKind::Corporate, &args.id) else {
        return report_missing(session, &args.id);
    };

    let mut draft = existing.to_draft();
    if let Some(name) = args.name {
        draft.corporate_name = name;
    }
    if let Some(person) = args.contact.contact_person {
        draft.contact_person = person;
    }
    if let Some(no) = args.contact.contact_no {
        draft.contact_no = no;
    }
    if let Some(date) = args.date {
        draft.billing_date = date;
    }
    if !args.items.is_empty() {
        draft.line_items = args.items;
    }
    validate_corporate_draft(&draft)?;

    if !session.store.revise(&args.id, BillDraft::Corporate(draft)).is_applied() {
        return report_missing(session, &args.id);
    }
    let saved = session.store.require(BillKind::Corporate, &args.id)?;
    print_saved(session, "Updated", saved)
}
