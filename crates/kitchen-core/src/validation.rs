//! # Validation Module
//!
//! Form rules a draft must satisfy before the app hands it to the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization                                              │
//! │  ├── Dates must parse as YYYY-MM-DD                                    │
//! │  └── Persons / prices must be numbers                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (called by the app)                              │
//! │  ├── Required text fields                                              │
//! │  ├── Contact number format                                             │
//! │  └── Per-row persons / unit price / package name                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Billing store                                                │
//! │  └── Accepts anything; totals are always recomputed                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Draft validators collect every failure instead of stopping at the
//! first, so the form can flag all offending fields at once. Row fields
//! are keyed with the row index: `persons_0`, `unitPrice_2`.
//!
//! ## Usage
//! ```rust
//! use kitchen_core::validation::{validate_contact_no, validate_required};
//!
//! assert!(validate_contact_no("01712345678").is_ok());
//! assert!(validate_contact_no("0171-234").is_err());
//! assert!(validate_required("corporateName", "  ").is_err());
//! ```

use crate::error::{ValidationError, ValidationErrors};
use crate::types::{BillDraft, CorporateDraft, EventDraft};
use crate::{CONTACT_NO_MAX_DIGITS, CONTACT_NO_MIN_DIGITS};

/// Result type for single-field validators.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound for names, contact persons and descriptions.
pub const MAX_TEXT_LEN: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Non-blank text no longer than [`MAX_TEXT_LEN`] characters.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates a contact number.
///
/// ## Rules
/// - Required
/// - 10 to 14 ASCII digits after trimming; no spaces, dashes or `+`
///
/// ## Example
/// ```rust
/// use kitchen_core::validation::validate_contact_no;
///
/// assert!(validate_contact_no(" 01712345678 ").is_ok());
/// assert!(validate_contact_no("8801712345678").is_ok());
/// assert!(validate_contact_no("+8801712345678").is_err());
/// assert!(validate_contact_no("017123").is_err());
/// ```
pub fn validate_contact_no(contact_no: &str) -> ValidationResult<()> {
    let contact_no = contact_no.trim();

    if contact_no.is_empty() {
        return Err(ValidationError::Required {
            field: "contactNo".to_string(),
        });
    }

    let len = contact_no.len();
    if !contact_no.bytes().all(|b| b.is_ascii_digit())
        || !(CONTACT_NO_MIN_DIGITS..=CONTACT_NO_MAX_DIGITS).contains(&len)
    {
        return Err(ValidationError::InvalidFormat {
            field: "contactNo".to_string(),
            reason: format!(
                "must be {CONTACT_NO_MIN_DIGITS}-{CONTACT_NO_MAX_DIGITS} digits"
            ),
        });
    }

    Ok(())
}

/// Persons on one row; zero is rejected.
pub fn validate_persons(row: usize, persons: u32) -> ValidationResult<()> {
    if persons == 0 {
        return Err(ValidationError::MustBePositive {
            field: row_key("persons", row),
        });
    }
    Ok(())
}

/// Unit price on one row; zero, negative and non-finite prices are rejected.
pub fn validate_unit_price(row: usize, unit_price: f64) -> ValidationResult<()> {
    if !(unit_price.is_finite() && unit_price > 0.0) {
        return Err(ValidationError::MustBePositive {
            field: row_key("unitPrice", row),
        });
    }
    Ok(())
}

fn row_key(field: &str, row: usize) -> String {
    format!("{field}_{row}")
}

// =============================================================================
// Draft Validators
// =============================================================================

/// Runs every corporate form rule.
///
/// Dates are typed on the draft, so a missing or malformed billing or
/// service date has already been rejected while parsing the input.
pub fn validate_corporate_draft(draft: &CorporateDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    collect(&mut errors, validate_required("corporateName", &draft.corporate_name));
    collect(&mut errors, validate_required("contactPerson", &draft.contact_person));
    collect(&mut errors, validate_contact_no(&draft.contact_no));

    if draft.line_items.is_empty() {
        errors.push(ValidationError::Empty {
            field: "lineItems".to_string(),
            what: "line item".to_string(),
        });
    }
    for (row, item) in draft.line_items.iter().enumerate() {
        collect(&mut errors, validate_persons(row, item.persons));
        collect(&mut errors, validate_unit_price(row, item.unit_price));
    }

    errors.into_result()
}

/// Runs every event form rule.
pub fn validate_event_draft(draft: &EventDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    collect(&mut errors, validate_required("eventName", &draft.event_name));
    collect(&mut errors, validate_required("contactPerson", &draft.contact_person));
    collect(&mut errors, validate_contact_no(&draft.contact_no));

    if draft.items.is_empty() {
        errors.push(ValidationError::Empty {
            field: "items".to_string(),
            what: "package item".to_string(),
        });
    }
    for (row, item) in draft.items.iter().enumerate() {
        collect(
            &mut errors,
            validate_required(&row_key("packageName", row), &item.package_name),
        );
        if item.description.trim().chars().count() > MAX_TEXT_LEN {
            errors.push(ValidationError::TooLong {
                field: row_key("description", row),
                max: MAX_TEXT_LEN,
            });
        }
        collect(&mut errors, validate_persons(row, item.persons));
        collect(&mut errors, validate_unit_price(row, item.unit_price));
    }

    errors.into_result()
}

/// Dispatches on the draft kind.
pub fn validate_draft(draft: &BillDraft) -> Result<(), ValidationErrors> {
    match draft {
        BillDraft::Corporate(d) => validate_corporate_draft(d),
        BillDraft::Event(d) => validate_event_draft(d),
    }
}

fn collect(errors: &mut ValidationErrors, result: ValidationResult<()>) {
    if let Err(e) = result {
        errors.push(e);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CorporateLineDraft, EventLineDraft, PackageType};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn corporate_line(persons: u32, unit_price: i64) -> CorporateLineDraft {
        CorporateLineDraft {
            id: None,
            service_date: day(1),
            package_type: PackageType::Economy,
            persons,
            unit_price: unit_price as f64,
        }
    }

    fn corporate(line_items: Vec<CorporateLineDraft>) -> CorporateDraft {
        CorporateDraft {
            corporate_name: "Acme Textiles".to_string(),
            contact_person: "Nusrat Jahan".to_string(),
            contact_no: "01712345678".to_string(),
            billing_date: day(31),
            line_items,
        }
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("eventName", "Annual Dinner").is_ok());
        assert_eq!(
            validate_required("eventName", "   "),
            Err(ValidationError::Required {
                field: "eventName".to_string()
            })
        );
        assert!(validate_required("eventName", &"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_contact_no() {
        assert!(validate_contact_no("0171234567").is_ok()); // 10
        assert!(validate_contact_no("01712345678901").is_ok()); // 14

        assert!(validate_contact_no("").is_err());
        assert!(validate_contact_no("017123456").is_err()); // 9
        assert!(validate_contact_no("017123456789012").is_err()); // 15
        assert!(validate_contact_no("01712 345678").is_err());
        assert!(validate_contact_no("০১৭১২৩৪৫৬৭৮").is_err());
    }

    #[test]
    fn test_valid_corporate_draft() {
        let draft = corporate(vec![corporate_line(3, 500), corporate_line(2, 1000)]);
        assert!(validate_corporate_draft(&draft).is_ok());
    }

    #[test]
    fn test_corporate_draft_collects_all_failures() {
        let mut draft = corporate(vec![corporate_line(0, 500), corporate_line(2, 0)]);
        draft.corporate_name = String::new();
        draft.contact_no = "12".to_string();

        let errors = validate_corporate_draft(&draft).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.get("corporateName").is_some());
        assert!(errors.get("contactNo").is_some());
        assert!(errors.get("persons_0").is_some());
        assert!(errors.get("unitPrice_1").is_some());
        assert!(errors.get("unitPrice_0").is_none());
    }

    #[test]
    fn test_corporate_draft_requires_a_line() {
        let errors = validate_corporate_draft(&corporate(Vec::new())).unwrap_err();
        assert!(matches!(
            errors.get("lineItems"),
            Some(ValidationError::Empty { .. })
        ));
    }

    #[test]
    fn test_event_draft_rules() {
        let draft = EventDraft {
            event_name: "Wedding Reception".to_string(),
            contact_person: "Karim".to_string(),
            contact_no: "01812345678".to_string(),
            event_date: day(14),
            items: vec![EventLineDraft {
                id: None,
                package_name: " ".to_string(),
                package_type: PackageType::Premium,
                description: String::new(),
                persons: 150,
                unit_price: 850.0,
            }],
        };

        let errors = validate_draft(&BillDraft::Event(draft.clone())).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("packageName_0").is_some());

        let mut fixed = draft;
        fixed.items[0].package_name = "Buffet".to_string();
        assert!(validate_event_draft(&fixed).is_ok());

        fixed.items.clear();
        assert!(validate_event_draft(&fixed).unwrap_err().get("items").is_some());
    }
}
