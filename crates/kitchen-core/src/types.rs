//! # Domain Types
//!
//! Line items, bills and the drafts the form layer assembles them from.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────┐            │
//! │  │    CorporateBill     │          │      EventBill       │            │
//! │  │  ──────────────────  │          │  ──────────────────  │            │
//! │  │  BillHeader (flat)   │          │  BillHeader (flat)   │            │
//! │  │  "Corporate" tag     │          │  "Event" tag         │            │
//! │  │  corporate_name      │          │  event_name          │            │
//! │  │  billing_date        │          │  event_date          │            │
//! │  │  line_items ─────┐   │          │  items ──────────┐   │            │
//! │  └──────────────────┼───┘          └──────────────────┼───┘            │
//! │                     ▼                                 ▼                 │
//! │  ┌──────────────────────┐          ┌──────────────────────┐            │
//! │  │  CorporateLineItem   │          │    EventLineItem     │            │
//! │  │  service_date        │          │  package_name        │            │
//! │  │  package_type        │          │  package_type        │            │
//! │  │  LineAmounts (flat)  │          │  description         │            │
//! │  └──────────────────────┘          │  LineAmounts (flat)  │            │
//! │                                    └──────────────────────┘            │
//! │                                                                         │
//! │  BillHeader: id, invoice_no, contact, totals, words, timestamps        │
//! │  LineAmounts: persons, unit_price, line_total (always derived)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Fields
//! `line_total`, `grand_total`, `total_persons` and `amount_in_words` are
//! never authoritative. [`BillRecord::refresh_totals`] recomputes all of
//! them from the current persons and unit prices.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::calculator::{compute_aggregate, line_total, BillTotals};
use crate::money::Money;

// =============================================================================
// Bill Kind
// =============================================================================

/// The two kinds of invoice the operator issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BillKind {
    Corporate,
    Event,
}

impl BillKind {
    /// Lowercase identifier used by commands and routes.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BillKind::Corporate => "corporate",
            BillKind::Event => "event",
        }
    }

    /// The `billingType` tag written on records of this kind.
    pub const fn tag(&self) -> &'static str {
        match self {
            BillKind::Corporate => "Corporate",
            BillKind::Event => "Event",
        }
    }
}

impl fmt::Display for BillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "corporate" => Ok(BillKind::Corporate),
            "event" => Ok(BillKind::Event),
            other => Err(format!("unknown bill kind '{other}', expected corporate or event")),
        }
    }
}

// =============================================================================
// Billing Type Tags
// =============================================================================

/// Declares a zero-sized tag that serializes as a fixed string and refuses
/// any other value on the way back in.
macro_rules! billing_tag {
    ($name:ident, $kind:expr) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl $name {
            pub const KIND: BillKind = $kind;
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(Self::KIND.tag())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let tag = String::deserialize(deserializer)?;
                if tag == Self::KIND.tag() {
                    Ok($name)
                } else {
                    Err(de::Error::custom(format!(
                        "expected billingType \"{}\", found \"{}\"",
                        Self::KIND.tag(),
                        tag
                    )))
                }
            }
        }
    };
}

billing_tag!(CorporateTag, BillKind::Corporate);
billing_tag!(EventTag, BillKind::Event);

// =============================================================================
// Package Type
// =============================================================================

/// Package tier offered on every line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PackageType {
    #[default]
    Economy,
    Standard,
    Premium,
}

impl PackageType {
    pub const ALL: [PackageType; 3] = [PackageType::Economy, PackageType::Standard, PackageType::Premium];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PackageType::Economy => "Economy",
            PackageType::Standard => "Standard",
            PackageType::Premium => "Premium",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackageType::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown package type '{}', expected Economy, Standard or Premium", s.trim()))
    }
}

// =============================================================================
// Line Amounts
// =============================================================================

/// Persons, unit price and the line total derived from them.
///
/// The unit price is kept as entered (it may be fractional); only the
/// product is normalized, so `line_total` always equals
/// [`line_total(persons, unit_price)`](crate::calculator::line_total).
/// Fields are private so the total can only come from that product (or
/// from a stored snapshot, read verbatim).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineAmounts {
    persons: u32,
    #[serde(deserialize_with = "lenient_price")]
    unit_price: f64,
    line_total: Money,
}

impl LineAmounts {
    pub fn new(persons: u32, unit_price: f64) -> Self {
        LineAmounts {
            persons,
            unit_price,
            line_total: line_total(f64::from(persons), unit_price),
        }
    }

    #[inline]
    pub fn persons(&self) -> u32 {
        self.persons
    }

    #[inline]
    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        self.line_total
    }

    /// Recomputes `line_total` from the current inputs.
    pub fn refresh(&mut self) {
        self.line_total = line_total(f64::from(self.persons), self.unit_price);
    }
}

/// Reads a unit price, counting `null` (a NaN when written) as zero.
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let price = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    Ok(if price.is_finite() { price } else { 0.0 })
}

// =============================================================================
// Line Items
// =============================================================================

/// Behaviour shared by both line-item variants.
pub trait LineItem {
    fn id(&self) -> &str;
    fn amounts(&self) -> &LineAmounts;
    fn amounts_mut(&mut self) -> &mut LineAmounts;

    fn persons(&self) -> u32 {
        self.amounts().persons()
    }

    fn line_total(&self) -> Money {
        self.amounts().line_total()
    }
}

/// One date-wise row of a corporate bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CorporateLineItem {
    pub id: String,
    #[ts(as = "String")]
    pub service_date: NaiveDate,
    pub package_type: PackageType,
    #[serde(flatten)]
    pub amounts: LineAmounts,
}

impl LineItem for CorporateLineItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn amounts(&self) -> &LineAmounts {
        &self.amounts
    }

    fn amounts_mut(&mut self) -> &mut LineAmounts {
        &mut self.amounts
    }
}

/// One package row of an event bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EventLineItem {
    pub id: String,
    pub package_name: String,
    pub package_type: PackageType,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub amounts: LineAmounts,
}

impl LineItem for EventLineItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn amounts(&self) -> &LineAmounts {
        &self.amounts
    }

    fn amounts_mut(&mut self) -> &mut LineAmounts {
        &mut self.amounts
    }
}

// =============================================================================
// Bill Header
// =============================================================================

/// Fields every bill carries regardless of kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillHeader {
    /// Unique within its collection (UUID v4).
    pub id: String,

    /// Assigned once on create, never regenerated.
    pub invoice_no: String,

    pub contact_person: String,
    pub contact_no: String,

    /// Sum of persons over all lines.
    #[serde(rename = "numberOfPackages")]
    #[ts(type = "number")]
    pub total_persons: u64,

    pub grand_total: Money,
    pub amount_in_words: String,

    /// Milliseconds since the Unix epoch on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[ts(type = "number")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[ts(type = "number")]
    pub updated_at: DateTime<Utc>,
}

impl BillHeader {
    fn apply_totals(&mut self, totals: BillTotals) {
        self.grand_total = totals.grand_total;
        self.total_persons = totals.total_persons;
        self.amount_in_words = totals.amount_in_words;
    }
}

// =============================================================================
// Bill Record Trait
// =============================================================================

/// The seam the store is generic over: one implementation per bill kind.
pub trait BillRecord: Clone {
    const KIND: BillKind;
    type Item: LineItem;
    type Draft;

    fn header(&self) -> &BillHeader;
    fn header_mut(&mut self) -> &mut BillHeader;
    fn items(&self) -> &[Self::Item];
    fn items_mut(&mut self) -> &mut [Self::Item];

    /// Corporate name or event name.
    fn title(&self) -> &str;

    /// Business date (billing date or event date).
    fn date(&self) -> NaiveDate;

    /// Builds a persisted-shape record from a draft. Totals are computed
    /// here; id, invoice number and clock come from the caller.
    fn assemble(draft: Self::Draft, id: String, invoice_no: String, now: DateTime<Utc>) -> Self;

    /// Replaces the business fields with the draft's, keeping the identity,
    /// invoice number and creation time.
    fn apply_draft(&mut self, draft: Self::Draft, now: DateTime<Utc>);

    /// Prefills a draft from this record (the edit form's starting point).
    fn to_draft(&self) -> Self::Draft;

    #[inline]
    fn id(&self) -> &str {
        &self.header().id
    }

    /// Recomputes every line total, then the aggregate and its words.
    fn refresh_totals(&mut self) {
        for item in self.items_mut() {
            item.amounts_mut().refresh();
        }
        let totals = compute_aggregate(self.items());
        self.header_mut().apply_totals(totals);
    }
}

// =============================================================================
// Corporate Bill
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CorporateBill {
    #[serde(flatten)]
    pub header: BillHeader,
    #[ts(type = "\"Corporate\"")]
    pub billing_type: CorporateTag,
    pub corporate_name: String,
    #[ts(as = "String")]
    pub billing_date: NaiveDate,
    pub line_items: Vec<CorporateLineItem>,
}

/// Line row as entered on the corporate form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CorporateLineDraft {
    /// Existing row id when editing; `None` for a new row.
    #[serde(default)]
    pub id: Option<String>,
    #[ts(as = "String")]
    pub service_date: NaiveDate,
    #[serde(default)]
    pub package_type: PackageType,
    pub persons: u32,
    /// As entered; not rounded.
    #[serde(deserialize_with = "lenient_price")]
    pub unit_price: f64,
}

impl CorporateLineDraft {
    fn into_item(self) -> CorporateLineItem {
        CorporateLineItem {
            id: self.id.unwrap_or_else(new_id),
            service_date: self.service_date,
            package_type: self.package_type,
            amounts: LineAmounts::new(self.persons, self.unit_price),
        }
    }
}

/// Everything the corporate form collects before save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CorporateDraft {
    pub corporate_name: String,
    pub contact_person: String,
    pub contact_no: String,
    #[ts(as = "String")]
    pub billing_date: NaiveDate,
    pub line_items: Vec<CorporateLineDraft>,
}

impl BillRecord for CorporateBill {
    const KIND: BillKind = BillKind::Corporate;
    type Item = CorporateLineItem;
    type Draft = CorporateDraft;

    fn header(&self) -> &BillHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut BillHeader {
        &mut self.header
    }

    fn items(&self) -> &[CorporateLineItem] {
        &self.line_items
    }

    fn items_mut(&mut self) -> &mut [CorporateLineItem] {
        &mut self.line_items
    }

    fn title(&self) -> &str {
        &self.corporate_name
    }

    fn date(&self) -> NaiveDate {
        self.billing_date
    }

    fn assemble(draft: CorporateDraft, id: String, invoice_no: String, now: DateTime<Utc>) -> Self {
        let mut bill = CorporateBill {
            header: BillHeader {
                id,
                invoice_no,
                contact_person: String::new(),
                contact_no: String::new(),
                total_persons: 0,
                grand_total: Money::zero(),
                amount_in_words: String::new(),
                created_at: now,
                updated_at: now,
            },
            billing_type: CorporateTag,
            corporate_name: String::new(),
            billing_date: draft.billing_date,
            line_items: Vec::new(),
        };
        bill.apply_draft(draft, now);
        bill
    }

    fn apply_draft(&mut self, draft: CorporateDraft, now: DateTime<Utc>) {
        self.corporate_name = draft.corporate_name.trim().to_string();
        self.header.contact_person = draft.contact_person.trim().to_string();
        self.header.contact_no = draft.contact_no.trim().to_string();
        self.billing_date = draft.billing_date;
        self.line_items = draft
            .line_items
            .into_iter()
            .map(CorporateLineDraft::into_item)
            .collect();
        self.header.updated_at = now;
        self.refresh_totals();
    }

    fn to_draft(&self) -> CorporateDraft {
        CorporateDraft {
            corporate_name: self.corporate_name.clone(),
            contact_person: self.header.contact_person.clone(),
            contact_no: self.header.contact_no.clone(),
            billing_date: self.billing_date,
            line_items: self
                .line_items
                .iter()
                .map(|it| CorporateLineDraft {
                    id: Some(it.id.clone()),
                    service_date: it.service_date,
                    package_type: it.package_type,
                    persons: it.amounts.persons(),
                    unit_price: it.amounts.unit_price(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Event Bill
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EventBill {
    #[serde(flatten)]
    pub header: BillHeader,
    #[ts(type = "\"Event\"")]
    pub billing_type: EventTag,
    pub event_name: String,
    #[ts(as = "String")]
    pub event_date: NaiveDate,
    pub items: Vec<EventLineItem>,
}

/// Package row as entered on the event form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EventLineDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub package_name: String,
    #[serde(default)]
    pub package_type: PackageType,
    #[serde(default)]
    pub description: String,
    pub persons: u32,
    /// As entered; not rounded.
    #[serde(deserialize_with = "lenient_price")]
    pub unit_price: f64,
}

impl EventLineDraft {
    fn into_item(self) -> EventLineItem {
        EventLineItem {
            id: self.id.unwrap_or_else(new_id),
            package_name: self.package_name.trim().to_string(),
            package_type: self.package_type,
            description: self.description.trim().to_string(),
            amounts: LineAmounts::new(self.persons, self.unit_price),
        }
    }
}

/// Everything the event form collects before save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EventDraft {
    pub event_name: String,
    pub contact_person: String,
    pub contact_no: String,
    #[ts(as = "String")]
    pub event_date: NaiveDate,
    pub items: Vec<EventLineDraft>,
}

impl BillRecord for EventBill {
    const KIND: BillKind = BillKind::Event;
    type Item = EventLineItem;
    type Draft = EventDraft;

    fn header(&self) -> &BillHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut BillHeader {
        &mut self.header
    }

    fn items(&self) -> &[EventLineItem] {
        &self.items
    }

    fn items_mut(&mut self) -> &mut [EventLineItem] {
        &mut self.items
    }

    fn title(&self) -> &str {
        &self.event_name
    }

    fn date(&self) -> NaiveDate {
        self.event_date
    }

    fn assemble(draft: EventDraft, id: String, invoice_no: String, now: DateTime<Utc>) -> Self {
        let mut bill = EventBill {
            header: BillHeader {
                id,
                invoice_no,
                contact_person: String::new(),
                contact_no: String::new(),
                total_persons: 0,
                grand_total: Money::zero(),
                amount_in_words: String::new(),
                created_at: now,
                updated_at: now,
            },
            billing_type: EventTag,
            event_name: String::new(),
            event_date: draft.event_date,
            items: Vec::new(),
        };
        bill.apply_draft(draft, now);
        bill
    }

    fn apply_draft(&mut self, draft: EventDraft, now: DateTime<Utc>) {
        self.event_name = draft.event_name.trim().to_string();
        self.header.contact_person = draft.contact_person.trim().to_string();
        self.header.contact_no = draft.contact_no.trim().to_string();
        self.event_date = draft.event_date;
        self.items = draft.items.into_iter().map(EventLineDraft::into_item).collect();
        self.header.updated_at = now;
        self.refresh_totals();
    }

    fn to_draft(&self) -> EventDraft {
        EventDraft {
            event_name: self.event_name.clone(),
            contact_person: self.header.contact_person.clone(),
            contact_no: self.header.contact_no.clone(),
            event_date: self.event_date,
            items: self
                .items
                .iter()
                .map(|it| EventLineDraft {
                    id: Some(it.id.clone()),
                    package_name: it.package_name.clone(),
                    package_type: it.package_type,
                    description: it.description.clone(),
                    persons: it.amounts.persons(),
                    unit_price: it.amounts.unit_price(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Sum Types
// =============================================================================

/// A bill of either kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bill {
    Corporate(CorporateBill),
    Event(EventBill),
}

impl Bill {
    pub fn kind(&self) -> BillKind {
        match self {
            Bill::Corporate(_) => BillKind::Corporate,
            Bill::Event(_) => BillKind::Event,
        }
    }

    pub fn header(&self) -> &BillHeader {
        match self {
            Bill::Corporate(b) => &b.header,
            Bill::Event(b) => &b.header,
        }
    }

    pub fn id(&self) -> &str {
        &self.header().id
    }

    pub fn title(&self) -> &str {
        match self {
            Bill::Corporate(b) => b.title(),
            Bill::Event(b) => b.title(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Bill::Corporate(b) => b.date(),
            Bill::Event(b) => b.date(),
        }
    }
}

impl From<CorporateBill> for Bill {
    fn from(bill: CorporateBill) -> Self {
        Bill::Corporate(bill)
    }
}

impl From<EventBill> for Bill {
    fn from(bill: EventBill) -> Self {
        Bill::Event(bill)
    }
}

/// A draft of either kind; the variant selects the target collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BillDraft {
    Corporate(CorporateDraft),
    Event(EventDraft),
}

impl BillDraft {
    pub fn kind(&self) -> BillKind {
        match self {
            BillDraft::Corporate(_) => BillKind::Corporate,
            BillDraft::Event(_) => BillKind::Event,
        }
    }
}

/// Generates a fresh record identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
