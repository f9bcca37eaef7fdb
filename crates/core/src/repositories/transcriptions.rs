//! Read-only transcription access.
//!
//! Same contract as appointment access: callers verify the owning patient
//! first, queries scope by `patient_id`.

use sqlx::PgPool;
use uuid::Uuid;

use crate::transcription::Transcription;
use crate::{PatientError, PatientResult};

const TRANSCRIPTION_COLUMNS: &str = "id, patient_id, source, content, created_at";

/// Service for listing and reading a patient's transcriptions.
#[derive(Clone)]
pub struct TranscriptionService {
    pool: PgPool,
}

impl TranscriptionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists a patient's transcriptions ordered by creation time ascending.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::Database` if the query fails.
    pub async fn list_for_patient(&self, patient_id: Uuid) -> PatientResult<Vec<Transcription>> {
        let transcriptions = sqlx::query_as::<_, Transcription>(&format!(
            "SELECT {TRANSCRIPTION_COLUMNS} FROM transcriptions \
             WHERE patient_id = $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(patient_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transcriptions)
    }

    /// Fetches a single transcription under the given patient.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::TranscriptionNotFound` if the patient has no
    /// such transcription, or `PatientError::Database` if the query fails.
    pub async fn get(
        &self,
        patient_id: Uuid,
        transcription_id: Uuid,
    ) -> PatientResult<Transcription> {
        sqlx::query_as::<_, Transcription>(&format!(
            "SELECT {TRANSCRIPTION_COLUMNS} FROM transcriptions \
             WHERE id = $1 AND patient_id = $2"
        ))
        .bind(transcription_id)
        .bind(patient_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(PatientError::TranscriptionNotFound)
    }
}
