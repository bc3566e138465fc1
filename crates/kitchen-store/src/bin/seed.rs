//! # Seed Data Generator
//!
//! Populates the billing store with demo bills for development.
//!
//! ## Usage
//! ```bash
//! # Generate 24 bills (default)
//! cargo run -p kitchen-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p kitchen-store --bin seed -- --count 200
//!
//! # Specify data directory
//! cargo run -p kitchen-store --bin seed -- --data-dir ./data
//! ```
//!
//! ## Generated Bills
//! Every third bill is an event bill, the rest are corporate. Bills go
//! through the normal create path, so invoice numbers and totals are
//! exactly what the app would produce:
//! - Corporate: one line per service day, 1-5 days, 15-80 persons a day
//! - Event: 1-3 packages, 50-300 guests
//! - Unit prices drawn from a fixed per-tier price list

use chrono::{Duration, NaiveDate};
use kitchen_core::{
    BillDraft, CorporateDraft, CorporateLineDraft, EventDraft, EventLineDraft, PackageType,
};
use kitchen_store::{BillingStore, StorageConfig};
use std::env;

/// Corporate clients with their contact person.
const CLIENTS: &[(&str, &str)] = &[
    ("Meghna Textiles Ltd", "Sharmin Akter"),
    ("Padma Software Solutions", "Tanvir Ahmed"),
    ("Jamuna Logistics", "Rafiq Islam"),
    ("Karnaphuli Garments", "Nusrat Jahan"),
    ("Surma Pharmaceuticals", "Imran Hossain"),
    ("Buriganga Bank Head Office", "Farzana Rahman"),
    ("Teesta Telecom", "Mahmudul Hasan"),
    ("Rupsha Engineering", "Sadia Chowdhury"),
];

/// Event occasions.
const EVENTS: &[&str] = &[
    "Wedding Reception",
    "Holud Night",
    "Corporate Iftar",
    "Annual General Meeting",
    "Product Launch",
    "Birthday Celebration",
    "Aqiqah Lunch",
    "Alumni Reunion",
];

/// Event packages with tier and price.
const PACKAGES: &[(&str, PackageType, i64, &str)] = &[
    ("Kacchi Biryani", PackageType::Premium, 520, "Mutton kacchi with borhani"),
    ("Morog Polao", PackageType::Standard, 380, "Chicken roast, egg, salad"),
    ("Plain Polao Set", PackageType::Economy, 260, "Beef curry, dal, salad"),
    ("Dessert Platter", PackageType::Standard, 120, "Firni and roshmalai"),
    ("Tea Break", PackageType::Economy, 90, "Tea, cookies, samosa"),
];

/// Corporate lunch price per person by tier.
fn lunch_price(tier: PackageType) -> i64 {
    match tier {
        PackageType::Economy => 150,
        PackageType::Standard => 220,
        PackageType::Premium => 350,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 24;
    let mut data_dir = String::from("./kitchen_dev_data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(24);
                    i += 1;
                }
            }
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Cloud Kitchen Billing Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>       Number of bills to generate (default: 24)");
                println!("  -d, --data-dir <DIR>  Data directory (default: ./kitchen_dev_data)");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Cloud Kitchen Billing Seed Data Generator");
    println!("===========================================");
    println!("Data dir: {}", data_dir);
    println!("Bills:    {}", count);
    println!();

    let mut store = BillingStore::from_config(&StorageConfig::new(&data_dir))?;
    println!("✓ Opened billing store");

    let existing = store.state().bill_count();
    if existing > 0 {
        println!("⚠ Store already has {} bills", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Run `kitchen reset --yes` to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating bills...");

    let start = std::time::Instant::now();
    for seed in 0..count {
        let draft = if seed % 3 == 2 {
            BillDraft::Event(generate_event(seed))
        } else {
            BillDraft::Corporate(generate_corporate(seed))
        };
        store.create(draft);

        if (seed + 1) % 50 == 0 {
            println!("  Generated {} bills...", seed + 1);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} bills in {:?}", count, elapsed);
    println!("  Corporate: {}", store.corporate_bills().len());
    println!("  Event:     {}", store.event_bills().len());
    println!("  Next invoice: {}", store.peek_next_invoice_no());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

fn contact_no(seed: usize) -> String {
    // Bangladeshi mobile prefixes, 11 digits total
    const PREFIXES: [&str; 4] = ["017", "018", "019", "015"];
    format!("{}{:08}", PREFIXES[seed % PREFIXES.len()], (seed * 7_919) % 100_000_000)
}

/// Generates a corporate bill covering a run of consecutive service days.
fn generate_corporate(seed: usize) -> CorporateDraft {
    let (client, contact) = CLIENTS[seed % CLIENTS.len()];
    let first_day = base_date() + Duration::days((seed * 11 % 330) as i64);
    let days = 1 + seed % 5;

    let line_items = (0..days)
        .map(|d| {
            let tier = PackageType::ALL[(seed + d) % PackageType::ALL.len()];
            CorporateLineDraft {
                id: None,
                service_date: first_day + Duration::days(d as i64),
                package_type: tier,
                persons: 15 + ((seed * 13 + d * 7) % 66) as u32,
                unit_price: lunch_price(tier) as f64,
            }
        })
        .collect();

    CorporateDraft {
        corporate_name: client.to_string(),
        contact_person: contact.to_string(),
        contact_no: contact_no(seed),
        billing_date: first_day + Duration::days(days as i64),
        line_items,
    }
}

/// Generates an event bill with a handful of packages for one guest count.
fn generate_event(seed: usize) -> EventDraft {
    let (_, contact) = CLIENTS[(seed / 3) % CLIENTS.len()];
    let guests = 50 + ((seed * 37) % 251) as u32;
    let packages = 1 + seed % 3;

    let items = (0..packages)
        .map(|p| {
            let (name, tier, price, description) = PACKAGES[(seed + p * 2) % PACKAGES.len()];
            EventLineDraft {
                id: None,
                package_name: name.to_string(),
                package_type: tier,
                description: description.to_string(),
                persons: guests,
                unit_price: price as f64,
            }
        })
        .collect();

    EventDraft {
        event_name: EVENTS[seed % EVENTS.len()].to_string(),
        contact_person: contact.to_string(),
        contact_no: contact_no(seed),
        event_date: base_date() + Duration::days((seed * 17 % 360) as i64),
        items,
    }
}
