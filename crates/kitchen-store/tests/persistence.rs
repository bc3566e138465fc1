//! End-to-end store behaviour against real file storage.

use std::collections::HashSet;
use std::fs;

use chrono::NaiveDate;
use kitchen_core::{
    BillDraft, BillKind, BillRecord, CorporateDraft, CorporateLineDraft, EventDraft,
    EventLineDraft, PackageType,
};
use kitchen_store::{
    BillingStore, FileStorage, KeyValueStorage, SerializedState, StorageConfig, DEFAULT_STORAGE_KEY,
};
use tempfile::TempDir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
}

fn corporate(name: &str, persons: u32, unit_price: i64) -> BillDraft {
    BillDraft::Corporate(CorporateDraft {
        corporate_name: name.to_string(),
        contact_person: "Farhana Akter".to_string(),
        contact_no: "01911223344".to_string(),
        billing_date: day(31),
        line_items: vec![CorporateLineDraft {
            id: None,
            service_date: day(1),
            package_type: PackageType::Standard,
            persons,
            unit_price: unit_price as f64,
        }],
    })
}

fn event(name: &str) -> BillDraft {
    BillDraft::Event(EventDraft {
        event_name: name.to_string(),
        contact_person: "Tanvir Hasan".to_string(),
        contact_no: "01555667788".to_string(),
        event_date: day(20),
        items: vec![
            EventLineDraft {
                id: None,
                package_name: "Kacchi Biryani".to_string(),
                package_type: PackageType::Premium,
                description: "With borhani".to_string(),
                persons: 120,
                unit_price: 450.0,
            },
            EventLineDraft {
                id: None,
                package_name: "Dessert".to_string(),
                package_type: PackageType::Economy,
                description: String::new(),
                persons: 120,
                unit_price: 80.0,
            },
        ],
    })
}

#[test]
fn test_state_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let config = StorageConfig::new(temp.path());

    let expected = {
        let mut store = BillingStore::from_config(&config).unwrap();
        store.create(corporate("Acme Textiles", 25, 180));
        let gala = store.create(event("Annual Gala"));
        store.create(corporate("Delta Pharma", 60, 220));

        let mut revised = match gala {
            kitchen_core::Bill::Event(b) => b,
            other => panic!("expected an event bill, got {other:?}"),
        };
        revised.items[1].amounts = kitchen_core::LineAmounts::new(100, 80.0);
        assert!(store.update(revised.into()).is_applied());

        store.state().clone()
    };

    let reopened = BillingStore::from_config(&config).unwrap();
    assert_eq!(reopened.state(), &expected);
    assert_eq!(reopened.peek_next_invoice_no(), "INV-00004");
    assert_eq!(reopened.event_bills()[0].header().total_persons, 220);
    assert_eq!(reopened.event_bills()[0].header().grand_total.units(), 62_000);
}

#[test]
fn test_invoice_numbers_never_collide() {
    let mut store = BillingStore::new();
    let mut seen = HashSet::new();
    let mut last_seq = store.invoice_seq();

    for i in 0..40 {
        let bill = if i % 3 == 0 {
            store.create(event(&format!("Event {i}")))
        } else {
            store.create(corporate(&format!("Client {i}"), 10, 300))
        };
        assert!(seen.insert(bill.header().invoice_no.clone()));
        assert!(store.invoice_seq() > last_seq);
        last_seq = store.invoice_seq();

        if i % 4 == 0 {
            let _ = store.delete(bill.kind(), bill.id());
        }
    }

    assert_eq!(seen.len(), 40);
    assert_eq!(store.invoice_seq().value(), 41);
}

#[test]
fn test_snapshot_without_counter_never_reissues_numbers() {
    let mut source = BillingStore::new();
    source.create(corporate("First Client", 4, 250));
    source.create(event("Second Event"));
    let mut snapshot: serde_json::Value =
        serde_json::from_str(source.snapshot().unwrap().as_str()).unwrap();

    for seq in [serde_json::Value::Null, 0.into(), 1.into()] {
        snapshot["invoiceSeq"] = seq;
        let mut store = BillingStore::new();
        store.restore(&SerializedState::new(snapshot.to_string()));
        assert_eq!(store.peek_next_invoice_no(), "INV-00003");

        let third = store.create(corporate("Third Client", 2, 100));
        let numbers: HashSet<String> = store
            .list(None)
            .iter()
            .map(|b| b.header().invoice_no.clone())
            .collect();
        assert_eq!(third.header().invoice_no, "INV-00003");
        assert_eq!(numbers.len(), 3);
    }

    snapshot.as_object_mut().unwrap().remove("invoiceSeq");
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(format!("{DEFAULT_STORAGE_KEY}.json")),
        snapshot.to_string(),
    )
    .unwrap();
    let store = BillingStore::from_config(&StorageConfig::new(temp.path())).unwrap();
    assert_eq!(store.invoice_seq().value(), 3);
}

#[test]
fn test_delete_shrinks_by_exactly_one() {
    let mut store = BillingStore::new();
    let ids: Vec<String> = (0..5)
        .map(|i| store.create(corporate(&format!("C{i}"), 2, 100)).id().to_string())
        .collect();

    let before = store.corporate_bills().len();
    assert!(store.delete(BillKind::Corporate, &ids[2]).is_applied());
    assert_eq!(store.corporate_bills().len(), before - 1);
    assert!(store.corporate_bills().iter().all(|b| b.id() != ids[2]));

    let _ = store.delete(BillKind::Corporate, "never-issued");
    assert_eq!(store.corporate_bills().len(), before - 1);
}

#[test]
fn test_corrupt_file_starts_empty() {
    let temp = TempDir::new().unwrap();
    let storage = FileStorage::new(temp.path());
    storage.set(DEFAULT_STORAGE_KEY, "{\"corporateBills\": [oops").unwrap();

    let mut store = BillingStore::from_config(&StorageConfig::new(temp.path())).unwrap();
    assert!(store.state().is_empty());
    assert_eq!(store.peek_next_invoice_no(), "INV-00001");

    // The next mutation overwrites the unreadable snapshot.
    store.create(event("Recovery Dinner"));
    let text = storage.get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    assert!(text.contains("Recovery Dinner"));
}

#[test]
fn test_reads_wrapped_snapshot() {
    let temp = TempDir::new().unwrap();

    let mut source = BillingStore::new();
    source.create(corporate("Legacy Corp", 5, 700));
    let flat: serde_json::Value = serde_json::from_str(source.snapshot().unwrap().as_str()).unwrap();
    let wrapped = serde_json::json!({ "billing": flat });

    fs::write(
        temp.path().join(format!("{DEFAULT_STORAGE_KEY}.json")),
        wrapped.to_string(),
    )
    .unwrap();

    let store = BillingStore::from_config(&StorageConfig::new(temp.path())).unwrap();
    assert_eq!(store.state(), source.state());
    assert_eq!(store.corporate_bills()[0].title(), "Legacy Corp");
}

#[test]
fn test_custom_key_is_isolated() {
    let temp = TempDir::new().unwrap();
    let config = StorageConfig::new(temp.path()).key("branch_two");

    let mut store = BillingStore::from_config(&config).unwrap();
    store.create(corporate("Branch Client", 3, 300));

    assert!(temp.path().join("branch_two.json").exists());
    let default_store = BillingStore::from_config(&StorageConfig::new(temp.path())).unwrap();
    assert!(default_store.state().is_empty());
}
