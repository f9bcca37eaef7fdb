//! Patient wire and row types.
//!
//! The same `Patient` struct is used for the persisted row and the JSON
//! representation returned by the API; the store and the wire format agree
//! on field names and nullability.

use chrono::{DateTime, NaiveDate, Utc};
use record_types::Patch;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A persisted patient record.
///
/// `id` and `created_at` are assigned by the server at creation and never
/// change afterwards. `updated_at` stays null until the first update and is
/// refreshed on every subsequent one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub condition: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a patient. Only the name fields are required.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PatientCreate {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
}

/// Payload for partially updating a patient.
///
/// Every field is a [`Patch`]: an absent key leaves the stored value
/// untouched, an explicit `null` clears an optional field, and a value
/// replaces it. The required name fields reject `null`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PatientUpdate {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub first_name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub last_name: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub date_of_birth: Patch<NaiveDate>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub gender: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub phone_number: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub address: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub emergency_contact: Patch<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub condition: Patch<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_payload_requires_only_names() {
        let req: PatientCreate =
            serde_json::from_str(r#"{"first_name": "John", "last_name": "Doe"}"#)
                .expect("minimal payload should deserialize");

        assert_eq!(req.first_name, "John");
        assert_eq!(req.last_name, "Doe");
        assert!(req.date_of_birth.is_none());
        assert!(req.email.is_none());
        assert!(req.condition.is_none());
    }

    #[test]
    fn test_create_payload_rejects_missing_required_field() {
        let result = serde_json::from_str::<PatientCreate>(r#"{"first_name": "John"}"#);
        assert!(result.is_err(), "last_name is required");
    }

    #[test]
    fn test_update_payload_distinguishes_absent_from_null() {
        let req: PatientUpdate =
            serde_json::from_str(r#"{"email": "j@example.com", "gender": null}"#)
                .expect("should deserialize");

        assert_eq!(req.email, Patch::Value("j@example.com".to_string()));
        assert_eq!(req.gender, Patch::Null);
        assert!(req.phone_number.is_missing());
        assert!(req.first_name.is_missing());
    }

    #[test]
    fn test_patient_serializes_null_updated_at() {
        let patient = Patient {
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
            created_at: Utc::now(),
            updated_at: None,
        };

        let json = serde_json::to_value(&patient).expect("should serialize");
        assert!(json["updated_at"].is_null(), "updated_at should be null");
        assert_eq!(
            json["id"].as_str().map(str::len),
            Some(36),
            "id should use the 36-character hyphenated form"
        );
    }
}
