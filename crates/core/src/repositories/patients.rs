//! Patient record persistence.
//!
//! All SQL touching the `patients` table lives here. Handlers never see the
//! store directly; they call this service and translate its errors.

use chrono::Utc;
use record_types::Patch;
use sqlx::PgPool;
use uuid::Uuid;

use crate::patient::{Patient, PatientCreate, PatientUpdate};
use crate::validation;
use crate::{PatientError, PatientResult};

const PATIENT_COLUMNS: &str = "id, first_name, last_name, date_of_birth, gender, phone_number, \
     email, address, emergency_contact, condition, created_at, updated_at";

/// Service for patient CRUD operations against the relational store.
#[derive(Clone)]
pub struct PatientService {
    pool: PgPool,
}

impl PatientService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists patients ordered by creation time ascending, with `id` as a
    /// stable tie-break so limit/offset pagination never skips or repeats a
    /// row. No upper bound is enforced on `limit`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::Database` if the query fails.
    pub async fn list(&self, limit: u32, offset: u32) -> PatientResult<Vec<Patient>> {
        let patients = sqlx::query_as::<_, Patient>(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients \
             ORDER BY created_at ASC, id ASC LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await?;

        Ok(patients)
    }

    /// Creates a patient record.
    ///
    /// The server assigns `id` and `created_at`; `updated_at` starts null.
    /// The stored row is returned, so any store-side normalisation (e.g.
    /// timestamp precision) is reflected in the response.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidField` if the payload violates a
    /// constraint, or `PatientError::Database` if the insert fails.
    pub async fn create(&self, req: PatientCreate) -> PatientResult<Patient> {
        validation::validate_create(&req)?;

        let patient = sqlx::query_as::<_, Patient>(&format!(
            "INSERT INTO patients (id, first_name, last_name, date_of_birth, gender, \
             phone_number, email, address, emergency_contact, condition, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {PATIENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(req.date_of_birth)
        .bind(&req.gender)
        .bind(&req.phone_number)
        .bind(&req.email)
        .bind(&req.address)
        .bind(&req.emergency_contact)
        .bind(&req.condition)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("created patient {}", patient.id);
        Ok(patient)
    }

    /// Fetches a patient by id.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::PatientNotFound` if no row matches, or
    /// `PatientError::Database` if the query fails.
    pub async fn get(&self, id: Uuid) -> PatientResult<Patient> {
        sqlx::query_as::<_, Patient>(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(PatientError::PatientNotFound)
    }

    /// Returns whether a patient with the given id exists.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::Database` if the query fails.
    pub async fn exists(&self, id: Uuid) -> PatientResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM patients WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Applies a partial update to a patient.
    ///
    /// Runs as a read-modify-write inside a single transaction: the current
    /// row is fetched, the patch is resolved against it, and the full row is
    /// written back with `updated_at` set to the current server time, even
    /// when no field value actually changed. Concurrent updates to the same
    /// id race at the row level; the last committed write wins.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::PatientNotFound` if the id does not exist,
    /// `PatientError::InvalidField` for a constraint violation, or
    /// `PatientError::Database` if a statement fails.
    pub async fn update(&self, id: Uuid, patch: PatientUpdate) -> PatientResult<Patient> {
        validation::validate_update(&patch)?;

        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Patient>(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(PatientError::PatientNotFound)?;

        // Null on the required name fields was rejected by validation, so
        // anything but an explicit value keeps the current one.
        let first_name = match patch.first_name {
            Patch::Value(v) => v,
            _ => current.first_name,
        };
        let last_name = match patch.last_name {
            Patch::Value(v) => v,
            _ => current.last_name,
        };

        let patient = sqlx::query_as::<_, Patient>(&format!(
            "UPDATE patients SET first_name = $2, last_name = $3, date_of_birth = $4, \
             gender = $5, phone_number = $6, email = $7, address = $8, \
             emergency_contact = $9, condition = $10, updated_at = $11 \
             WHERE id = $1 RETURNING {PATIENT_COLUMNS}"
        ))
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(patch.date_of_birth.apply(current.date_of_birth))
        .bind(patch.gender.apply(current.gender))
        .bind(patch.phone_number.apply(current.phone_number))
        .bind(patch.email.apply(current.email))
        .bind(patch.address.apply(current.address))
        .bind(patch.emergency_contact.apply(current.emergency_contact))
        .bind(patch.condition.apply(current.condition))
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("updated patient {id}");
        Ok(patient)
    }

    /// Deletes a patient by id. Appointments and transcriptions owned by the
    /// patient go with it (foreign-key cascade).
    ///
    /// # Errors
    ///
    /// Returns `PatientError::PatientNotFound` if no row matches, or
    /// `PatientError::Database` if the delete fails.
    pub async fn delete(&self, id: Uuid) -> PatientResult<()> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PatientError::PatientNotFound);
        }

        tracing::debug!("deleted patient {id}");
        Ok(())
    }
}
