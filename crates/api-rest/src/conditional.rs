//! Conditional-read negotiation for patient fetches.
//!
//! A fetched record carries an opaque weak validator derived from its
//! last-modified instant. When the client presents the same validator in
//! `If-None-Match`, the full payload is not re-transmitted. This is purely a
//! read-side optimisation; writes are never conditional.

use axum::http::header::IF_NONE_MATCH;
use axum::http::HeaderMap;
use records_core::Patient;

/// Computes the weak validator for a patient record.
///
/// Derived from `updated_at` when set, otherwise `created_at`, using the
/// instant's epoch-millisecond representation. The `W/` prefix marks it as a
/// weak validator: equivalent content, not byte-identical.
pub fn weak_validator(patient: &Patient) -> String {
    let instant = patient.updated_at.unwrap_or(patient.created_at);
    format!("W/\"{}\"", instant.timestamp_millis())
}

/// Returns true when the client-presented `If-None-Match` header matches
/// `validator`.
///
/// Weak comparison semantics: the `W/` prefix is ignored on both sides, a
/// comma-separated list is accepted, and `*` matches any current record.
pub fn if_none_match(headers: &HeaderMap, validator: &str) -> bool {
    let Some(raw) = headers.get(IF_NONE_MATCH).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let target = opaque_tag(validator);
    raw.split(',')
        .map(str::trim)
        .any(|candidate| candidate == "*" || opaque_tag(candidate) == target)
}

fn opaque_tag(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn patient(updated: bool) -> Patient {
        Patient {
            id: Uuid::new_v4(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            date_of_birth: None,
            gender: None,
            phone_number: None,
            email: None,
            address: None,
            emergency_contact: None,
            condition: None,
            created_at: Utc.with_ymd_and_hms(2025, 10, 17, 14, 32, 0).unwrap(),
            updated_at: updated.then(|| Utc.with_ymd_and_hms(2025, 10, 18, 9, 15, 0).unwrap()),
        }
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(IF_NONE_MATCH, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_validator_uses_created_at_until_first_update() {
        let tag = weak_validator(&patient(false));
        let created_millis = patient(false).created_at.timestamp_millis();
        assert_eq!(tag, format!("W/\"{created_millis}\""));
    }

    #[test]
    fn test_validator_prefers_updated_at() {
        assert_ne!(
            weak_validator(&patient(true)),
            weak_validator(&patient(false)),
            "an update should change the validator"
        );
    }

    #[test]
    fn test_matching_validator_short_circuits() {
        let tag = weak_validator(&patient(true));
        assert!(if_none_match(&headers_with(&tag), &tag));
    }

    #[test]
    fn test_comparison_ignores_weakness_prefix() {
        let tag = weak_validator(&patient(false));
        let strong = tag.strip_prefix("W/").unwrap();
        assert!(if_none_match(&headers_with(strong), &tag));
    }

    #[test]
    fn test_list_and_wildcard_forms() {
        let tag = weak_validator(&patient(false));
        assert!(if_none_match(
            &headers_with(&format!("\"stale\", {tag}")),
            &tag
        ));
        assert!(if_none_match(&headers_with("*"), &tag));
    }

    #[test]
    fn test_stale_or_absent_validator_does_not_match() {
        let tag = weak_validator(&patient(false));
        assert!(!if_none_match(&headers_with("W/\"0\""), &tag));
        assert!(!if_none_match(&HeaderMap::new(), &tag));
    }
}
