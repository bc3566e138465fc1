//! # Billing Store
//!
//! The single owner of [`BillingState`]. Every mutation goes through here,
//! and every mutation is followed by a best-effort save.
//!
//! ## Bill Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Draft (form layer)                                                    │
//! │      │                                                                  │
//! │      │ create(draft)                                                    │
//! │      │   id = uuid, invoiceNo = INV-{seq}, seq += 1                     │
//! │      │   totals + words computed, prepended to its collection           │
//! │      ▼                                                                  │
//! │   Persisted ──update(bill)──► Persisted                                │
//! │      │        same slot, same invoiceNo + createdAt,                    │
//! │      │        fresh updatedAt, totals recomputed                        │
//! │      │                                                                  │
//! │      │ delete(kind, id)                                                 │
//! │      ▼                                                                  │
//! │   (removed; its invoice number is never reissued)                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Update and delete on an unknown id leave the state untouched and report
//! [`MutationOutcome::NotFound`]; nothing is saved in that case.
//!
//! ## Example
//! ```rust
//! use chrono::NaiveDate;
//! use kitchen_core::{BillDraft, CorporateDraft, CorporateLineDraft, PackageType};
//! use kitchen_store::BillingStore;
//!
//! let mut store = BillingStore::new();
//! let day = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
//!
//! let bill = store.create(BillDraft::Corporate(CorporateDraft {
//!     corporate_name: "X Ltd".into(),
//!     contact_person: "Rahim".into(),
//!     contact_no: "01712345678".into(),
//!     billing_date: day,
//!     line_items: vec![CorporateLineDraft {
//!         id: None,
//!         service_date: day,
//!         package_type: PackageType::Economy,
//!         persons: 3,
//!         unit_price: 500.0,
//!     }],
//! }));
//!
//! assert_eq!(bill.header().invoice_no, "INV-00001");
//! assert_eq!(bill.header().grand_total.units(), 1500);
//! assert_eq!(store.peek_next_invoice_no(), "INV-00002");
//! ```

use chrono::{DateTime, SubsecRound, Utc};
use kitchen_core::{
    new_id, Bill, BillDraft, BillKind, BillRecord, CoreError, CoreResult, CorporateBill,
    CorporateDraft, EventBill, EventDraft, InvoiceSeq,
};
use tracing::{debug, info, warn};

use crate::error::StoreResult;
use crate::persistence::{NoPersistence, PersistHook, SnapshotPersistence};
use crate::state::{BillingState, SerializedState, StoredBill};
use crate::storage::StorageConfig;

/// Whether an update or delete found its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "NotFound means the state was left unchanged"]
pub enum MutationOutcome {
    Applied,
    NotFound,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

/// Owned billing state plus its persistence hook.
pub struct BillingStore {
    state: BillingState,
    hook: Box<dyn PersistHook>,
}

impl Default for BillingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BillingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillingStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Construction
// =============================================================================

impl BillingStore {
    /// Empty store that persists nothing.
    pub fn new() -> Self {
        BillingStore {
            state: BillingState::new(),
            hook: Box::new(NoPersistence),
        }
    }

    /// Store seeded from whatever `hook` loads.
    ///
    /// A load or decode failure is logged and the store starts empty.
    pub fn open(hook: Box<dyn PersistHook>) -> Self {
        let state = match hook.load() {
            Ok(Some(snapshot)) => decode_or_empty(&snapshot),
            Ok(None) => {
                debug!("No stored billing state, starting empty");
                BillingState::new()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load billing state, starting empty");
                BillingState::new()
            }
        };

        info!(
            corporate_bills = state.corporate_bills.len(),
            event_bills = state.event_bills.len(),
            invoice_seq = state.invoice_seq.value(),
            "Billing store opened"
        );

        BillingStore { state, hook }
    }

    /// Opens the store on the backend `config` describes.
    ///
    /// Fails only for an unusable storage key.
    pub fn from_config(config: &StorageConfig) -> StoreResult<Self> {
        let hook = SnapshotPersistence::from_config(config)?;
        Ok(Self::open(Box::new(hook)))
    }
}

// =============================================================================
// Mutations
// =============================================================================

impl BillingStore {
    /// Assembles `draft` into a new bill at the front of its collection.
    pub fn create(&mut self, draft: BillDraft) -> Bill {
        match draft {
            BillDraft::Corporate(d) => self.create_corporate(d).into(),
            BillDraft::Event(d) => self.create_event(d).into(),
        }
    }

    pub fn create_corporate(&mut self, draft: CorporateDraft) -> CorporateBill {
        self.insert_new(draft)
    }

    pub fn create_event(&mut self, draft: EventDraft) -> EventBill {
        self.insert_new(draft)
    }

    /// Replaces the stored bill with the same kind and id.
    ///
    /// The stored invoice number and creation time win over whatever `bill`
    /// carries; totals are recomputed from `bill`'s line items.
    pub fn update(&mut self, bill: Bill) -> MutationOutcome {
        match bill {
            Bill::Corporate(b) => self.replace(b),
            Bill::Event(b) => self.replace(b),
        }
    }

    pub fn update_corporate(&mut self, bill: CorporateBill) -> MutationOutcome {
        self.replace(bill)
    }

    pub fn update_event(&mut self, bill: EventBill) -> MutationOutcome {
        self.replace(bill)
    }

    /// Applies a form draft to the stored bill `id` of the draft's kind.
    pub fn revise(&mut self, id: &str, draft: BillDraft) -> MutationOutcome {
        match draft {
            BillDraft::Corporate(d) => self.revise_with::<CorporateBill>(id, d),
            BillDraft::Event(d) => self.revise_with::<EventBill>(id, d),
        }
    }

    /// Removes bill `id` from the `kind` collection.
    pub fn delete(&mut self, kind: BillKind, id: &str) -> MutationOutcome {
        match kind {
            BillKind::Corporate => self.remove::<CorporateBill>(id),
            BillKind::Event => self.remove::<EventBill>(id),
        }
    }

    /// Clears both collections and restarts the counter at 1.
    pub fn reset(&mut self) {
        let dropped = self.state.bill_count();
        self.state = BillingState::new();
        info!(dropped, "Billing state reset");
        self.persist();
    }

    fn insert_new<B: StoredBill>(&mut self, draft: B::Draft) -> B {
        let invoice_no = self.state.invoice_seq.invoice_no();
        let bill = B::assemble(draft, new_id(), invoice_no, now_ms());

        B::collection_mut(&mut self.state).insert(0, bill.clone());
        self.state.invoice_seq.advance();

        info!(
            kind = %B::KIND,
            id = %bill.id(),
            invoice_no = %bill.header().invoice_no,
            grand_total = bill.header().grand_total.units(),
            "Bill created"
        );
        self.persist();
        bill
    }

    fn replace<B: StoredBill>(&mut self, mut bill: B) -> MutationOutcome {
        let slot = B::collection_mut(&mut self.state)
            .iter_mut()
            .find(|stored| stored.id() == bill.id());
        let Some(slot) = slot else {
            debug!(kind = %B::KIND, id = %bill.id(), "Update ignored, bill not found");
            return MutationOutcome::NotFound;
        };

        let header = bill.header_mut();
        header.invoice_no = slot.header().invoice_no.clone();
        header.created_at = slot.header().created_at;
        header.updated_at = now_ms();
        bill.refresh_totals();
        *slot = bill;

        info!(
            kind = %B::KIND,
            id = %slot.id(),
            grand_total = slot.header().grand_total.units(),
            "Bill updated"
        );
        self.persist();
        MutationOutcome::Applied
    }

    fn revise_with<B: StoredBill>(&mut self, id: &str, draft: B::Draft) -> MutationOutcome {
        let existing = B::collection(&self.state).iter().find(|b| b.id() == id);
        let Some(existing) = existing else {
            debug!(kind = %B::KIND, id, "Revision ignored, bill not found");
            return MutationOutcome::NotFound;
        };

        let mut bill = existing.clone();
        bill.apply_draft(draft, now_ms());
        self.replace(bill)
    }

    fn remove<B: StoredBill>(&mut self, id: &str) -> MutationOutcome {
        let bills = B::collection_mut(&mut self.state);
        let Some(index) = bills.iter().position(|b| b.id() == id) else {
            debug!(kind = %B::KIND, id, "Delete ignored, bill not found");
            return MutationOutcome::NotFound;
        };

        let removed = bills.remove(index);
        info!(
            kind = %B::KIND,
            id,
            invoice_no = %removed.header().invoice_no,
            "Bill deleted"
        );
        self.persist();
        MutationOutcome::Applied
    }
}

// =============================================================================
// Snapshots
// =============================================================================

impl BillingStore {
    /// Serializes the full state.
    pub fn snapshot(&self) -> StoreResult<SerializedState> {
        self.state.encode()
    }

    /// Replaces the full state with `snapshot`'s.
    ///
    /// Unparsable text restores the empty initial state.
    pub fn restore(&mut self, snapshot: &SerializedState) {
        self.state = decode_or_empty(snapshot);
        info!(
            bills = self.state.bill_count(),
            invoice_seq = self.state.invoice_seq.value(),
            "Billing state restored"
        );
        self.persist();
    }

    fn persist(&self) {
        let result = self.state.encode().and_then(|snapshot| self.hook.save(&snapshot));
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist billing state");
        }
    }
}

fn decode_or_empty(snapshot: &SerializedState) -> BillingState {
    BillingState::decode(snapshot).unwrap_or_else(|e| {
        warn!(error = %e, "Stored billing state is unreadable, starting empty");
        BillingState::new()
    })
}

/// Timestamps are kept at millisecond precision, the resolution they are
/// serialized with.
fn now_ms() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

// =============================================================================
// Queries
// =============================================================================

impl BillingStore {
    pub fn state(&self) -> &BillingState {
        &self.state
    }

    /// Most recent first.
    pub fn corporate_bills(&self) -> &[CorporateBill] {
        &self.state.corporate_bills
    }

    /// Most recent first.
    pub fn event_bills(&self) -> &[EventBill] {
        &self.state.event_bills
    }

    /// Bills of `kind`, or of both kinds (corporate first) when `None`.
    pub fn list(&self, kind: Option<BillKind>) -> Vec<Bill> {
        let corporate = self.state.corporate_bills.iter().cloned().map(Bill::from);
        let event = self.state.event_bills.iter().cloned().map(Bill::from);
        match kind {
            Some(BillKind::Corporate) => corporate.collect(),
            Some(BillKind::Event) => event.collect(),
            None => corporate.chain(event).collect(),
        }
    }

    pub fn invoice_seq(&self) -> InvoiceSeq {
        self.state.invoice_seq
    }

    /// Invoice number the next create would assign.
    pub fn peek_next_invoice_no(&self) -> String {
        self.state.invoice_seq.invoice_no()
    }

    pub fn find(&self, kind: BillKind, id: &str) -> Option<Bill> {
        match kind {
            BillKind::Corporate => find_in::<CorporateBill>(&self.state, id).map(Bill::from),
            BillKind::Event => find_in::<EventBill>(&self.state, id).map(Bill::from),
        }
    }

    /// Like [`find`](Self::find), with a miss reported as an error.
    pub fn require(&self, kind: BillKind, id: &str) -> CoreResult<Bill> {
        self.find(kind, id).ok_or_else(|| CoreError::BillNotFound {
            kind,
            id: id.to_string(),
        })
    }
}

fn find_in<B: StoredBill>(state: &BillingState, id: &str) -> Option<B> {
    B::collection(state).iter().find(|b| b.id() == id).cloned()
}

// =============================================================================
// Unit Tests
// =============================================================================
