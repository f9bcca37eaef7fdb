//! Store-backed services, one per resource.

pub mod appointments;
pub mod patients;
pub mod transcriptions;

pub use appointments::AppointmentService;
pub use patients::PatientService;
pub use transcriptions::TranscriptionService;
