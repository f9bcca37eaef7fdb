//! # Records Core
//!
//! Core business logic for the patient-records service.
//!
//! This crate contains pure data operations and persistence:
//! - Patient record creation, retrieval, partial update and deletion
//! - Read-only access to a patient's appointments and transcriptions
//! - Input validation against the storage column constraints
//! - Connection pooling and schema bootstrap for the relational store
//!
//! **No API concerns**: HTTP routing, conditional-request negotiation and
//! status-code mapping belong in `api-rest`.

#![warn(rust_2018_idioms)]

pub mod appointment;
pub mod config;
pub mod db;
pub mod error;
pub mod patient;
pub mod repositories;
pub mod transcription;
pub mod validation;

pub use appointment::Appointment;
pub use config::{CoreConfig, DbConfig};
pub use error::{PatientError, PatientResult};
pub use patient::{Patient, PatientCreate, PatientUpdate};
pub use record_types::Patch;
pub use transcription::Transcription;
