//! # API REST
//!
//! REST API implementation for the patient-records service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - Conditional GET negotiation for patient fetches
//! - REST-specific concerns (JSON serialization, CORS, status mapping)
//!
//! Uses `records-core` for data operations and persistence.

#![warn(rust_2018_idioms)]

pub mod conditional;
pub mod error;
pub mod handlers;

use axum::routing::get;
use axum::Router;
use records_core::db::PgPool;
use records_core::repositories::{AppointmentService, PatientService, TranscriptionService};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across request handlers.
///
/// Each service holds a clone of the bounded connection pool; cloning the
/// state per request is cheap and carries no locks.
#[derive(Clone)]
pub struct AppState {
    pub patients: PatientService,
    pub appointments: AppointmentService,
    pub transcriptions: TranscriptionService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            patients: PatientService::new(pool.clone()),
            appointments: AppointmentService::new(pool.clone()),
            transcriptions: TranscriptionService::new(pool),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_patients,
        handlers::create_patient,
        handlers::get_patient,
        handlers::update_patient,
        handlers::delete_patient,
        handlers::list_appointments,
        handlers::get_appointment,
        handlers::list_transcriptions,
        handlers::get_transcription,
    ),
    components(schemas(
        handlers::HealthRes,
        error::ErrorBody,
        records_core::Patient,
        records_core::PatientCreate,
        records_core::PatientUpdate,
        records_core::Appointment,
        records_core::Transcription,
    ))
)]
struct ApiDoc;

/// Builds the service router with all routes, documentation and layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/patients",
            get(handlers::list_patients).post(handlers::create_patient),
        )
        .route(
            "/patients/:id",
            get(handlers::get_patient)
                .put(handlers::update_patient)
                .delete(handlers::delete_patient),
        )
        .route("/patients/:id/appointments", get(handlers::list_appointments))
        .route(
            "/patients/:id/appointments/:appointment_id",
            get(handlers::get_appointment),
        )
        .route(
            "/patients/:id/transcriptions",
            get(handlers::list_transcriptions),
        )
        .route(
            "/patients/:id/transcriptions/:transcription_id",
            get(handlers::get_transcription),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
