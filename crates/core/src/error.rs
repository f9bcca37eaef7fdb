#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    PatientNotFound,
    #[error("Appointment not found")]
    AppointmentNotFound,
    #[error("Transcription not found")]
    TranscriptionNotFound,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
