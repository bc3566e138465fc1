//! # Billing State
//!
//! The value the store owns and the snapshot format it is saved as.
//!
//! ## Snapshot Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {                                                                      │
//! │    "corporateBills": [ newest, ..., oldest ],                          │
//! │    "eventBills":     [ newest, ..., oldest ],                          │
//! │    "invoiceSeq":     7                                                  │
//! │  }                                                                      │
//! │                                                                         │
//! │  Also read (never written):                                             │
//! │  { "billing": { ...same fields... } }                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records are stored verbatim: decoding a snapshot does not recompute
//! totals, so `decode(encode(state)) == state` for every state the store
//! can reach. The one repair made on decode is the counter: it is raised
//! past the highest invoice number already issued, so a snapshot with a
//! missing or stale `invoiceSeq` never leads to a reissued number.

use kitchen_core::invoice::parse_invoice_no;
use kitchen_core::{Bill, BillRecord, CorporateBill, EventBill, InvoiceSeq};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

use crate::error::StoreResult;

/// Both bill collections and the shared invoice counter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingState {
    /// Most recent first.
    #[serde(default)]
    pub corporate_bills: Vec<CorporateBill>,

    /// Most recent first.
    #[serde(default)]
    pub event_bills: Vec<EventBill>,

    /// Missing, `null` and `0` all read as [`InvoiceSeq::START`], then
    /// [`decode`](Self::decode) raises it past any issued number.
    #[serde(default, deserialize_with = "lenient_seq")]
    pub invoice_seq: InvoiceSeq,
}

impl BillingState {
    /// Empty collections, counter at 1.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.corporate_bills.is_empty() && self.event_bills.is_empty()
    }

    pub fn bill_count(&self) -> usize {
        self.corporate_bills.len() + self.event_bills.len()
    }

    /// Encodes the state as snapshot text.
    pub fn encode(&self) -> StoreResult<SerializedState> {
        Ok(SerializedState(serde_json::to_string(self)?))
    }

    /// Decodes snapshot text in either the flat or the wrapped layout.
    pub fn decode(snapshot: &SerializedState) -> StoreResult<Self> {
        let layout: SnapshotLayout = serde_json::from_str(snapshot.as_str())?;
        let mut state = match layout {
            SnapshotLayout::Wrapped { billing } => billing,
            SnapshotLayout::Flat(state) => state,
        };
        state.repair_invoice_seq();
        Ok(state)
    }

    /// Highest counter value any stored bill was issued from.
    ///
    /// Bills whose invoice number does not parse count by position, so the
    /// result is never below the number of stored bills.
    pub fn highest_issued(&self) -> u64 {
        let from_numbers = self
            .corporate_bills
            .iter()
            .map(|b| b.header.invoice_no.as_str())
            .chain(self.event_bills.iter().map(|b| b.header.invoice_no.as_str()))
            .filter_map(parse_invoice_no)
            .max()
            .unwrap_or(0);
        from_numbers.max(self.bill_count() as u64)
    }

    fn repair_invoice_seq(&mut self) {
        let stored = self.invoice_seq;
        let issued = self.highest_issued();
        if self.invoice_seq.raise_past(issued) {
            warn!(
                stored = stored.value(),
                repaired = self.invoice_seq.value(),
                "Invoice counter was behind issued numbers, raised"
            );
        }
    }
}

// =============================================================================
// Collections
// =============================================================================

/// A bill type the state keeps a collection of.
pub trait StoredBill: BillRecord + Into<Bill> {
    fn collection(state: &BillingState) -> &Vec<Self>;
    fn collection_mut(state: &mut BillingState) -> &mut Vec<Self>;
}

impl StoredBill for CorporateBill {
    fn collection(state: &BillingState) -> &Vec<Self> {
        &state.corporate_bills
    }

    fn collection_mut(state: &mut BillingState) -> &mut Vec<Self> {
        &mut state.corporate_bills
    }
}

impl StoredBill for EventBill {
    fn collection(state: &BillingState) -> &Vec<Self> {
        &state.event_bills
    }

    fn collection_mut(state: &mut BillingState) -> &mut Vec<Self> {
        &mut state.event_bills
    }
}

fn lenient_seq<'de, D: Deserializer<'de>>(deserializer: D) -> Result<InvoiceSeq, D::Error> {
    let raw = Option::<u64>::deserialize(deserializer)?;
    Ok(InvoiceSeq::new(raw.unwrap_or(0)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotLayout {
    Wrapped { billing: BillingState },
    Flat(BillingState),
}

// =============================================================================
// Serialized State
// =============================================================================

/// Opaque snapshot text as handed to and read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedState(String);

impl SerializedState {
    pub fn new(text: impl Into<String>) -> Self {
        SerializedState(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SerializedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SerializedState {
    fn from(text: String) -> Self {
        SerializedState(text)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_encoding() {
        let encoded = BillingState::new().encode().unwrap();
        assert_eq!(
            encoded.as_str(),
            r#"{"corporateBills":[],"eventBills":[],"invoiceSeq":1}"#
        );
    }

    #[test]
    fn test_decode_defaults_missing_fields() {
        let state = BillingState::decode(&SerializedState::new("{}")).unwrap();
        assert_eq!(state, BillingState::new());

        let state =
            BillingState::decode(&SerializedState::new(r#"{"invoiceSeq":0}"#)).unwrap();
        assert_eq!(state.invoice_seq, InvoiceSeq::START);

        let state =
            BillingState::decode(&SerializedState::new(r#"{"invoiceSeq":null}"#)).unwrap();
        assert_eq!(state.invoice_seq, InvoiceSeq::START);
    }

    #[test]
    fn test_decode_wrapped_layout() {
        let text = r#"{"billing":{"corporateBills":[],"eventBills":[],"invoiceSeq":9}}"#;
        let state = BillingState::decode(&SerializedState::new(text)).unwrap();
        assert_eq!(state.invoice_seq.value(), 9);
    }

    #[test]
    fn test_decode_raises_counter_past_issued_numbers() {
        let text = r#"{"corporateBills":[],"eventBills":[],"invoiceSeq":2}"#;
        let mut value: serde_json::Value = serde_json::from_str(text).unwrap();
        let bill = |invoice_no: &str| {
            serde_json::json!({
                "id": invoice_no.to_lowercase(),
                "invoiceNo": invoice_no,
                "contactPerson": "Rahim",
                "contactNo": "01712345678",
                "numberOfPackages": 0,
                "grandTotal": 0,
                "amountInWords": "BDT Zero Only",
                "createdAt": 0,
                "updatedAt": 0,
                "billingType": "Event",
                "eventName": "Gala",
                "eventDate": "2025-02-14",
                "items": []
            })
        };
        value["eventBills"] = serde_json::json!([bill("INV-00007"), bill("INV-00003")]);

        let state = BillingState::decode(&SerializedState::new(value.to_string())).unwrap();
        assert_eq!(state.highest_issued(), 7);
        assert_eq!(state.invoice_seq.value(), 8);

        // Unparsable numbers still count toward the floor.
        value["eventBills"] = serde_json::json!([bill("LEGACY-A"), bill("LEGACY-B"), bill("LEGACY-C")]);
        let state = BillingState::decode(&SerializedState::new(value.to_string())).unwrap();
        assert_eq!(state.invoice_seq.value(), 4);
    }

    #[test]
    fn test_decode_keeps_counter_ahead_of_bills() {
        let text = r#"{"corporateBills":[],"eventBills":[],"invoiceSeq":40}"#;
        let state = BillingState::decode(&SerializedState::new(text)).unwrap();
        assert_eq!(state.invoice_seq.value(), 40);
    }

    #[test]
    fn test_decode_garbage_is_error() {
        assert!(BillingState::decode(&SerializedState::new("not json")).is_err());
        assert!(BillingState::decode(&SerializedState::new(r#"{"corporateBills":7}"#)).is_err());
    }
}
