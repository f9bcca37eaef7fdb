//! Read-only appointment access.
//!
//! Appointments are written by an external scheduling process. Callers must
//! verify that the owning patient exists before touching this service; the
//! queries here scope by `patient_id` but do not re-check the patient row.

use sqlx::PgPool;
use uuid::Uuid;

use crate::appointment::Appointment;
use crate::{PatientError, PatientResult};

const APPOINTMENT_COLUMNS: &str =
    "id, patient_id, title, starts_at, ends_at, location, created_at, updated_at";

/// Service for listing and reading a patient's appointments.
#[derive(Clone)]
pub struct AppointmentService {
    pool: PgPool,
}

impl AppointmentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists a patient's appointments ordered by start time ascending.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::Database` if the query fails.
    pub async fn list_for_patient(&self, patient_id: Uuid) -> PatientResult<Vec<Appointment>> {
        let appointments = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments \
             WHERE patient_id = $1 ORDER BY starts_at ASC, id ASC"
        ))
        .bind(patient_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }

    /// Fetches a single appointment under the given patient.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::AppointmentNotFound` if the patient has no such
    /// appointment, or `PatientError::Database` if the query fails.
    pub async fn get(&self, patient_id: Uuid, appointment_id: Uuid) -> PatientResult<Appointment> {
        sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments \
             WHERE id = $1 AND patient_id = $2"
        ))
        .bind(appointment_id)
        .bind(patient_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(PatientError::AppointmentNotFound)
    }
}
