//! Transcription row type.
//!
//! Transcriptions are ingested by an external process; this service only
//! lists and reads them under their owning patient.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A transcription owned by exactly one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Transcription {
    pub id: Uuid,
    pub patient_id: Uuid,
    /// Where the text came from, e.g. `visit-note` or `upload`.
    pub source: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
