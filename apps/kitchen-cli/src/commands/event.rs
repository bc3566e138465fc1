//! Event bill commands.

use kitchen_core::validation::validate_event_draft;
use kitchen_core::{Bill, BillDraft, BillKind, BillRecord, EventDraft, EventLineDraft, PackageType};

use super::{parse_persons, parse_price, print_saved, report_missing, CommandResult, Session};
use crate::cli::{EventCreateArgs, EventUpdateArgs};

/// Parses `NAME,PACKAGE,PERSONS,UNIT_PRICE[,DESCRIPTION]`.
///
/// Everything after the fourth comma is the description, commas included.
pub fn parse_event_item(raw: &str) -> Result<EventLineDraft, String> {
    let mut fields = raw.splitn(5, ',').map(str::trim);
    let (Some(name), Some(package), Some(persons), Some(unit_price)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(format!(
            "expected NAME,PACKAGE,PERSONS,UNIT_PRICE[,DESCRIPTION], got '{raw}'"
        ));
    };

    Ok(EventLineDraft {
        id: None,
        package_name: name.to_string(),
        package_type: package.parse::<PackageType>()?,
        description: fields.next().unwrap_or_default().to_string(),
        persons: parse_persons(persons)?,
        unit_price: parse_price(unit_price)?,
    })
}

pub fn create(session: &mut Session<'_>, args: EventCreateArgs) -> CommandResult {
    let draft = EventDraft {
        event_name: args.name,
        contact_person: args.contact_person,
        contact_no: args.contact_no,
        event_date: args.date,
        items: args.items,
    };
    validate_event_draft(&draft)?;

    let bill = session.store.create_event(draft);
    print_saved(session, "Created", bill.into())
}

pub fn update(session: &mut Session<'_>, args: EventUpdateArgs) -> CommandResult {
    let Some(Bill::Event(existing)) = session.store.find(BillKind::Event, &args.id) else {
        return report_missing(session, &args.id);
    };

    let mut draft = existing.to_draft();
    if let Some(name) = args.name {
        draft.event_name = name;
    }
    if let Some(person) = args.contact.contact_person {
        draft.contact_person = person;
    }
    if let Some(no) = args.contact.contact_no {
        draft.contact_no = no;
    }
    if let Some(date) = args.date {
        draft.event_date = date;
    }
    if !args.items.is_empty() {
        draft.items = args.items;
    }
    validate_event_draft(&draft)?;

    if !session.store.revise(&args.id, BillDraft::Event(draft)).is_applied() {
        return report_missing(session, &args.id);
    }
    let saved = session.store.require(BillKind::Event, &args.id)?;
    print_saved(session, "Updated", saved)
}
