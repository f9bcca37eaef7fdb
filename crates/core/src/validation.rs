//! Input validation utilities.
//!
//! This module contains functions for validating patient payloads before any
//! persistence call. The length ceilings match the storage column widths, so
//! a payload that passes validation cannot be truncated or rejected by the
//! store.

use record_types::Patch;

use crate::patient::{PatientCreate, PatientUpdate};
use crate::{PatientError, PatientResult};

/// Column width of `first_name` and `last_name`.
pub const MAX_NAME_LEN: usize = 100;
/// Column width of `gender` and `phone_number`.
pub const MAX_SHORT_FIELD_LEN: usize = 32;
/// Column width of `email`.
pub const MAX_EMAIL_LEN: usize = 255;
/// Column width of `condition`.
pub const MAX_CONDITION_LEN: usize = 255;

/// Validates a creation payload.
///
/// # Errors
///
/// Returns `PatientError::InvalidField` naming the first offending field.
pub fn validate_create(req: &PatientCreate) -> PatientResult<()> {
    validate_name("first_name", &req.first_name)?;
    validate_name("last_name", &req.last_name)?;

    if let Some(gender) = &req.gender {
        validate_bounded("gender", gender, MAX_SHORT_FIELD_LEN)?;
    }
    if let Some(phone_number) = &req.phone_number {
        validate_bounded("phone_number", phone_number, MAX_SHORT_FIELD_LEN)?;
    }
    if let Some(email) = &req.email {
        validate_email(email)?;
    }
    if let Some(condition) = &req.condition {
        validate_bounded("condition", condition, MAX_CONDITION_LEN)?;
    }

    Ok(())
}

/// Validates an update payload.
///
/// Only supplied values are checked. The required name fields additionally
/// reject an explicit `null`, since a patient cannot exist without them.
///
/// # Errors
///
/// Returns `PatientError::InvalidField` naming the first offending field.
pub fn validate_update(req: &PatientUpdate) -> PatientResult<()> {
    if matches!(req.first_name, Patch::Null) {
        return Err(required_field_null("first_name"));
    }
    if matches!(req.last_name, Patch::Null) {
        return Err(required_field_null("last_name"));
    }

    if let Some(first_name) = req.first_name.as_value() {
        validate_name("first_name", first_name)?;
    }
    if let Some(last_name) = req.last_name.as_value() {
        validate_name("last_name", last_name)?;
    }
    if let Some(gender) = req.gender.as_value() {
        validate_bounded("gender", gender, MAX_SHORT_FIELD_LEN)?;
    }
    if let Some(phone_number) = req.phone_number.as_value() {
        validate_bounded("phone_number", phone_number, MAX_SHORT_FIELD_LEN)?;
    }
    if let Some(email) = req.email.as_value() {
        validate_email(email)?;
    }
    if let Some(condition) = req.condition.as_value() {
        validate_bounded("condition", condition, MAX_CONDITION_LEN)?;
    }

    Ok(())
}

/// Validates a required name field: non-blank and within the column width.
pub fn validate_name(field: &'static str, value: &str) -> PatientResult<()> {
    if value.trim().is_empty() {
        return Err(PatientError::InvalidField {
            field,
            reason: "cannot be empty".into(),
        });
    }
    validate_bounded(field, value, MAX_NAME_LEN)
}

/// Validates an email address: bounded length and a conservative syntax
/// check (a single `@` separating a non-empty local part from a domain that
/// contains an interior dot, with no whitespace anywhere).
pub fn validate_email(value: &str) -> PatientResult<()> {
    validate_bounded("email", value, MAX_EMAIL_LEN)?;

    let invalid = || PatientError::InvalidField {
        field: "email",
        reason: "is not a valid email address".into(),
    };

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }

    Ok(())
}

fn validate_bounded(field: &'static str, value: &str, max_len: usize) -> PatientResult<()> {
    if value.chars().count() > max_len {
        return Err(PatientError::InvalidField {
            field,
            reason: format!("exceeds maximum length of {max_len} characters"),
        });
    }
    Ok(())
}

fn required_field_null(field: &'static str) -> PatientError {
    PatientError::InvalidField {
        field,
        reason: "cannot be null".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_create() -> PatientCreate {
        serde_json::from_str(r#"{"first_name": "John", "last_name": "Doe"}"#).unwrap()
    }

    #[test]
    fn test_minimal_create_passes() {
        validate_create(&minimal_create()).expect("minimal payload should validate");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut req = minimal_create();
        req.first_name = "   ".to_string();

        let err = validate_create(&req).expect_err("blank first_name should fail");
        assert!(matches!(
            err,
            PatientError::InvalidField { field: "first_name", .. }
        ));
    }

    #[test]
    fn test_overlong_name_is_rejected() {
        let mut req = minimal_create();
        req.last_name = "x".repeat(MAX_NAME_LEN + 1);

        let err = validate_create(&req).expect_err("overlong last_name should fail");
        assert!(matches!(
            err,
            PatientError::InvalidField { field: "last_name", .. }
        ));
    }

    #[test]
    fn test_name_at_limit_passes() {
        let mut req = minimal_create();
        req.last_name = "x".repeat(MAX_NAME_LEN);

        validate_create(&req).expect("name at the column width should pass");
    }

    #[test]
    fn test_email_syntax() {
        for good in ["john.doe@example.com", "a@b.co", "first+tag@mail.example.org"] {
            validate_email(good).unwrap_or_else(|_| panic!("{good} should validate"));
        }

        for bad in [
            "not-an-email",
            "@example.com",
            "john@",
            "john@nodot",
            "john doe@example.com",
            "john@.example.com",
            "john@example.com.",
            "john@exam@ple.com",
        ] {
            assert!(
                validate_email(bad).is_err(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_overlong_email_is_rejected() {
        let local = "a".repeat(MAX_EMAIL_LEN);
        let err = validate_email(&format!("{local}@example.com"))
            .expect_err("overlong email should fail");
        assert!(matches!(
            err,
            PatientError::InvalidField { field: "email", .. }
        ));
    }

    #[test]
    fn test_update_rejects_null_required_field() {
        let req: PatientUpdate = serde_json::from_str(r#"{"first_name": null}"#).unwrap();

        let err = validate_update(&req).expect_err("null first_name should fail");
        assert!(matches!(
            err,
            PatientError::InvalidField { field: "first_name", .. }
        ));
    }

    #[test]
    fn test_update_allows_null_optional_field() {
        let req: PatientUpdate =
            serde_json::from_str(r#"{"gender": null, "email": "j@example.com"}"#).unwrap();

        validate_update(&req).expect("clearing an optional field should validate");
    }

    #[test]
    fn test_update_checks_supplied_values_only() {
        let req: PatientUpdate =
            serde_json::from_str(r#"{"phone_number": "+1-555-123-4567"}"#).unwrap();

        validate_update(&req).expect("supplied value within bounds should validate");

        let overlong: PatientUpdate = serde_json::from_str(&format!(
            r#"{{"phone_number": "{}"}}"#,
            "5".repeat(MAX_SHORT_FIELD_LEN + 1)
        ))
        .unwrap();

        let err = validate_update(&overlong).expect_err("overlong phone_number should fail");
        assert!(matches!(
            err,
            PatientError::InvalidField { field: "phone_number", .. }
        ));
    }
}
