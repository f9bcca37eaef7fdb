//! Persistence gateway: connection pool and schema bootstrap.
//!
//! Connections are drawn from a bounded pool for the duration of a single
//! request and returned unconditionally when the handler's future completes.
//! The schema is created at startup; there is no migration machinery beyond
//! `CREATE TABLE IF NOT EXISTS`.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::{DbConfig, PatientResult};

pub use sqlx::PgPool;

const CREATE_PATIENTS: &str = r#"
CREATE TABLE IF NOT EXISTS patients (
    id UUID PRIMARY KEY,
    first_name VARCHAR(100) NOT NULL,
    last_name VARCHAR(100) NOT NULL,
    date_of_birth DATE,
    gender VARCHAR(32),
    phone_number VARCHAR(32),
    email VARCHAR(255),
    address TEXT,
    emergency_contact TEXT,
    condition VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ
)
"#;

// Supports the list ordering (creation time ascending, id as tie-break).
const CREATE_PATIENTS_ORDER_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS patients_created_at_idx
    ON patients (created_at, id)
"#;

const CREATE_APPOINTMENTS: &str = r#"
CREATE TABLE IF NOT EXISTS appointments (
    id UUID PRIMARY KEY,
    patient_id UUID NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    starts_at TIMESTAMPTZ NOT NULL,
    ends_at TIMESTAMPTZ,
    location TEXT,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ
)
"#;

const CREATE_TRANSCRIPTIONS: &str = r#"
CREATE TABLE IF NOT EXISTS transcriptions (
    id UUID PRIMARY KEY,
    patient_id UUID NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
    source TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
)
"#;

/// Opens the connection pool against the configured store.
///
/// # Errors
///
/// Returns `PatientError::Database` if the store cannot be reached.
pub async fn connect(cfg: &DbConfig) -> PatientResult<PgPool> {
    let options = PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .database(&cfg.name)
        .username(&cfg.user)
        .password(&cfg.password);

    let pool = PgPoolOptions::new()
        .max_connections(cfg.pool_size)
        .connect_with(options)
        .await?;

    tracing::info!(
        "connected to {}:{}/{} (pool size {})",
        cfg.host,
        cfg.port,
        cfg.name,
        cfg.pool_size
    );

    Ok(pool)
}

/// Creates the tables and index if they do not exist yet.
///
/// # Errors
///
/// Returns `PatientError::Database` if any DDL statement fails.
pub async fn ensure_schema(pool: &PgPool) -> PatientResult<()> {
    sqlx::query(CREATE_PATIENTS).execute(pool).await?;
    sqlx::query(CREATE_PATIENTS_ORDER_INDEX).execute(pool).await?;
    sqlx::query(CREATE_APPOINTMENTS).execute(pool).await?;
    sqlx::query(CREATE_TRANSCRIPTIONS).execute(pool).await?;
    Ok(())
}
