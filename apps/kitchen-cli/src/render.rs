//! Plain-text views of bills.

use kitchen_core::money::format_money;
use kitchen_core::{Bill, BillHeader, CorporateBill, EventBill, LineItem, CURRENCY_CODE};
use std::fmt::Write;

/// One line per bill for `list`.
pub fn bill_summary(bill: &Bill) -> String {
    let header = bill.header();
    format!(
        "{:<10} {:<9} {}  {:<32} {:>16}  {}",
        header.invoice_no,
        bill.kind(),
        bill.date(),
        truncate(bill.title(), 32),
        header.grand_total.format(),
        header.id,
    )
}

/// Full invoice view for `show`, `create` and `update`.
pub fn bill_detail(bill: &Bill) -> String {
    let mut out = String::new();
    match bill {
        Bill::Corporate(b) => corporate_detail(&mut out, b),
        Bill::Event(b) => event_detail(&mut out, b),
    }
    out
}

fn corporate_detail(out: &mut String, bill: &CorporateBill) {
    write_heading(out, "Corporate", &bill.corporate_name, "Billing date:", bill.billing_date);
    write_contact(out, &bill.header);

    let _ = writeln!(
        out,
        "\n  {:<3} {:<12} {:<10} {:>8} {:>14} {:>16}",
        "#", "Date", "Package", "Persons", "Unit price", "Total"
    );
    for (i, item) in bill.line_items.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:<3} {:<12} {:<10} {:>8} {:>14} {:>16}",
            i + 1,
            item.service_date,
            item.package_type,
            item.persons(),
            format_price(item.amounts.unit_price()),
            item.line_total().format(),
        );
    }
    write_totals(out, &bill.header);
}

fn event_detail(out: &mut String, bill: &EventBill) {
    write_heading(out, "Event", &bill.event_name, "Event date:", bill.event_date);
    write_contact(out, &bill.header);

    let _ = writeln!(
        out,
        "\n  {:<3} {:<24} {:<10} {:>8} {:>14} {:>16}",
        "#", "Package", "Type", "Persons", "Unit price", "Total"
    );
    for (i, item) in bill.items.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:<3} {:<24} {:<10} {:>8} {:>14} {:>16}",
            i + 1,
            truncate(&item.package_name, 24),
            item.package_type,
            item.persons(),
            format_price(item.amounts.unit_price()),
            item.line_total().format(),
        );
        if !item.description.is_empty() {
            let _ = writeln!(out, "      {}", item.description);
        }
    }
    write_totals(out, &bill.header);
}

fn write_heading(
    out: &mut String,
    kind: &str,
    title: &str,
    date_label: &str,
    date: chrono::NaiveDate,
) {
    let _ = writeln!(out, "{kind} bill: {title}");
    let _ = writeln!(out, "  {date_label:<13} {date}");
}

fn write_contact(out: &mut String, header: &BillHeader) {
    let _ = writeln!(out, "  {:<13} {}", "Invoice no:", header.invoice_no);
    let _ = writeln!(out, "  {:<13} {} ({})", "Contact:", header.contact_person, header.contact_no);
}

fn write_totals(out: &mut String, header: &BillHeader) {
    let _ = writeln!(out);
    let _ = writeln!(out, "  Total persons: {}", header.total_persons);
    let _ = writeln!(out, "  Grand total:   {}", header.grand_total.format());
    let _ = writeln!(out, "  In words:      {}", header.amount_in_words);
    let _ = write!(out, "  Id:            {}", header.id);
}

/// Whole prices as money; fractional ones with two decimals, as entered.
fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format_money(price)
    } else {
        format!("{price:.2} {CURRENCY_CODE}")
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
