//! Request handlers for the patient-records REST API.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use records_core::{Appointment, Patient, PatientCreate, PatientUpdate, Transcription};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::conditional;
use crate::error::{ApiError, ErrorBody};
use crate::AppState;

/// Health check response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Pagination parameters for the patient listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Maximum number of records to return (no upper bound is enforced).
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Number of records to skip from the start of the ordering.
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u32 {
    10
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used for monitoring and load balancer probes.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "patient-records API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/patients",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of patients ordered by creation time", body = [Patient]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
/// List patients ordered by creation time ascending.
///
/// `limit` defaults to 10 and `offset` to 0. The ordering carries a stable
/// tie-break on `id`, so pages never skip or repeat a record.
///
/// # Errors
/// Returns `500 Internal Server Error` if the store query fails.
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let patients = state.patients.list(query.limit, query.offset).await?;
    Ok(Json(patients))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = PatientCreate,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 422, description = "Validation error", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
/// Create a new patient record.
///
/// The server assigns `id` and `created_at`; `updated_at` starts null.
///
/// # Errors
/// Returns `422 Unprocessable Entity` if a field violates a constraint, and
/// `500 Internal Server Error` if the insert fails.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<PatientCreate>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let patient = state.patients.create(req).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = Uuid, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient record, with a weak ETag validator", body = Patient),
        (status = 304, description = "Record unchanged since the presented validator"),
        (status = 404, description = "Patient not found", body = ErrorBody)
    )
)]
/// Fetch a single patient, honouring conditional requests.
///
/// When the client presents an `If-None-Match` validator matching the
/// record's current one, an empty `304 Not Modified` is returned instead of
/// the payload. Full responses carry the current validator in `ETag`.
///
/// # Errors
/// Returns `404 Not Found` if the id does not exist.
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let patient = state.patients.get(id).await?;

    let validator = conditional::weak_validator(&patient);
    if conditional::if_none_match(&headers, &validator) {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let mut response = Json(patient).into_response();
    if let Ok(value) = HeaderValue::from_str(&validator) {
        response.headers_mut().insert(header::ETAG, value);
    }
    Ok(response)
}

#[utoipa::path(
    put,
    path = "/patients/{id}",
    params(("id" = Uuid, Path, description = "Patient id")),
    request_body = PatientUpdate,
    responses(
        (status = 200, description = "Updated patient record", body = Patient),
        (status = 404, description = "Patient not found", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
/// Partially update a patient.
///
/// Only supplied fields are applied: an absent key leaves the stored value
/// untouched, an explicit `null` clears an optional field. `updated_at` is
/// set to the current server time on every successful update.
///
/// # Errors
/// Returns `404 Not Found` if the id does not exist and `422 Unprocessable
/// Entity` if a supplied value violates a constraint.
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PatientUpdate>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state.patients.update(id, req).await?;
    Ok(Json(patient))
}

#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = Uuid, Path, description = "Patient id")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 404, description = "Patient not found", body = ErrorBody)
    )
)]
/// Delete a patient by id.
///
/// # Errors
/// Returns `404 Not Found` if the id does not exist.
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.patients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/patients/{id}/appointments",
    params(("id" = Uuid, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient's appointments", body = [Appointment]),
        (status = 404, description = "Patient not found", body = ErrorBody)
    )
)]
/// List a patient's appointments.
///
/// The patient must exist; the list itself may be empty.
///
/// # Errors
/// Returns `404 Not Found` if the patient does not exist.
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    ensure_patient_exists(&state, id).await?;
    let appointments = state.appointments.list_for_patient(id).await?;
    Ok(Json(appointments))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/appointments/{appointment_id}",
    params(
        ("id" = Uuid, Path, description = "Patient id"),
        ("appointment_id" = Uuid, Path, description = "Appointment id")
    ),
    responses(
        (status = 200, description = "One appointment", body = Appointment),
        (status = 404, description = "Patient or appointment not found", body = ErrorBody)
    )
)]
/// Fetch one appointment under a patient.
///
/// # Errors
/// Returns `404 Not Found` if the patient does not exist, or if the patient
/// exists but has no such appointment.
#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppState>,
    Path((id, appointment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Appointment>, ApiError> {
    ensure_patient_exists(&state, id).await?;
    let appointment = state.appointments.get(id, appointment_id).await?;
    Ok(Json(appointment))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/transcriptions",
    params(("id" = Uuid, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient's transcriptions", body = [Transcription]),
        (status = 404, description = "Patient not found", body = ErrorBody)
    )
)]
/// List a patient's transcriptions.
///
/// # Errors
/// Returns `404 Not Found` if the patient does not exist.
#[axum::debug_handler]
pub async fn list_transcriptions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Transcription>>, ApiError> {
    ensure_patient_exists(&state, id).await?;
    let transcriptions = state.transcriptions.list_for_patient(id).await?;
    Ok(Json(transcriptions))
}

#[utoipa::path(
    get,
    path = "/patients/{id}/transcriptions/{transcription_id}",
    params(
        ("id" = Uuid, Path, description = "Patient id"),
        ("transcription_id" = Uuid, Path, description = "Transcription id")
    ),
    responses(
        (status = 200, description = "One transcription", body = Transcription),
        (status = 404, description = "Patient or transcription not found", body = ErrorBody)
    )
)]
/// Fetch one transcription under a patient.
///
/// # Errors
/// Returns `404 Not Found` if the patient does not exist, or if the patient
/// exists but has no such transcription.
#[axum::debug_handler]
pub async fn get_transcription(
    State(state): State<AppState>,
    Path((id, transcription_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Transcription>, ApiError> {
    ensure_patient_exists(&state, id).await?;
    let transcription = state.transcriptions.get(id, transcription_id).await?;
    Ok(Json(transcription))
}

// Nested resources are unreachable without a valid owning patient; the
// patient check runs before any nested lookup.
async fn ensure_patient_exists(state: &AppState, id: Uuid) -> Result<(), ApiError> {
    if !state.patients.exists(id).await? {
        return Err(records_core::PatientError::PatientNotFound.into());
    }
    Ok(())
}
