//! End-to-end runs of `execute` against a real data directory.

use clap::Parser;
use kitchen_cli::cli::Cli;
use kitchen_cli::config::CliConfig;
use kitchen_cli::error::ErrorCode;
use kitchen_cli::execute;
use kitchen_core::BillKind;
use kitchen_store::BillingStore;
use tempfile::TempDir;

fn config_for(dir: &TempDir) -> CliConfig {
    CliConfig::default().with_overrides(Some(dir.path().to_path_buf()), false)
}

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["kitchen"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_create_persists_between_runs() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);

    execute(
        parse(&[
            "corporate", "create", "--name", "X Ltd", "--contact-person", "Rahim",
            "--contact-no", "01712345678", "--date", "2025-01-31",
            "--item", "2025-01-02,Economy,3,500", "--item", "2025-01-03,Premium,2,1000",
        ]),
        &config,
    )
    .unwrap();
    execute(
        parse(&[
            "event", "create", "--name", "Gala", "--contact-person", "Karim",
            "--contact-no", "01812345678", "--date", "2025-02-14",
            "--item", "Buffet,Standard,150,850,Lunch buffet",
        ]),
        &config,
    )
    .unwrap();

    let store = BillingStore::from_config(&config.storage_config()).unwrap();
    assert_eq!(store.corporate_bills()[0].header.grand_total.units(), 3500);
    assert_eq!(store.event_bills()[0].header.invoice_no, "INV-00002");
    assert_eq!(store.peek_next_invoice_no(), "INV-00003");
}

#[test]
fn test_show_unknown_maps_to_not_found() {
    let dir = TempDir::new().unwrap();
    let err = execute(parse(&["show", "corporate", "nope"]), &config_for(&dir)).unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert_ne!(err.code.exit_status(), 0);
}

#[test]
fn test_delete_then_reset() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    execute(
        parse(&[
            "event", "create", "--name", "Gala", "--contact-person", "Karim",
            "--contact-no", "01812345678", "--date", "2025-02-14",
            "--item", "Tea,Economy,20,90",
        ]),
        &config,
    )
    .unwrap();

    let id = {
        let store = BillingStore::from_config(&config.storage_config()).unwrap();
        store.list(Some(BillKind::Event))[0].id().to_string()
    };
    execute(parse(&["delete", "event", &id]), &config).unwrap();
    // Deleting again is a reported no-op, not an error.
    execute(parse(&["delete", "event", &id]), &config).unwrap();

    let store = BillingStore::from_config(&config.storage_config()).unwrap();
    assert!(store.event_bills().is_empty());
    assert_eq!(store.peek_next_invoice_no(), "INV-00002");

    execute(parse(&["reset", "--yes"]), &config).unwrap();
    let store = BillingStore::from_config(&config.storage_config()).unwrap();
    assert_eq!(store.peek_next_invoice_no(), "INV-00001");
}

#[test]
fn test_invalid_storage_key_is_config_error() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir);
    config.storage_key = "../escape".to_string();
    let err = execute(parse(&["list"]), &config).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);
}
