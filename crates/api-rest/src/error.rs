//! Translation of core errors into HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use records_core::PatientError;
use serde::Serialize;
use utoipa::ToSchema;

/// Wire shape of every error response: `{"detail": "..."}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

/// Wrapper that maps `PatientError` onto an HTTP status and body.
///
/// Not-found conditions and validation failures are client errors carrying
/// the error's own message; store failures are logged and surfaced as an
/// opaque 500 so internals never leak to the caller.
#[derive(Debug)]
pub struct ApiError(PatientError);

impl From<PatientError> for ApiError {
    fn from(err: PatientError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            PatientError::PatientNotFound
            | PatientError::AppointmentNotFound
            | PatientError::TranscriptionNotFound => (StatusCode::NOT_FOUND, self.0.to_string()),
            PatientError::InvalidField { .. } | PatientError::InvalidInput(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string())
            }
            PatientError::Database(e) => {
                tracing::error!("store error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_for(err: PatientError) -> Response {
        ApiError::from(err).into_response()
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            response_for(PatientError::PatientNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            response_for(PatientError::AppointmentNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            response_for(PatientError::TranscriptionNotFound).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_validation_maps_to_422() {
        let err = PatientError::InvalidField {
            field: "email",
            reason: "is not a valid email address".into(),
        };
        assert_eq!(response_for(err).status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_store_failure_maps_to_500() {
        let err = PatientError::Database(sqlx::Error::PoolClosed);
        assert_eq!(
            response_for(err).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
