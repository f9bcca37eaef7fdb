//! Patient-records service binary.
//!
//! Boots the REST API: loads `.env`, initialises tracing, resolves
//! configuration once, connects the store pool, ensures the schema, and
//! serves until the process is stopped.

use records_core::{db, CoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the patient-records REST API server.
///
/// # Environment Variables
/// - `RECORDS_REST_ADDR`: Server address (default: "0.0.0.0:8000")
/// - `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`, `DB_PASS`: store connection
///   parameters (defaults: 127.0.0.1, 5432, patientdb, appuser, password)
/// - `DB_POOL_SIZE`: maximum pooled connections (default: 10)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the store cannot be reached or the schema cannot be created,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patient_records=info".parse()?)
                .add_directive("records_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::from_env()?;

    tracing::info!("-- Starting patient-records REST API on {}", cfg.rest_addr());

    let pool = db::connect(cfg.db()).await?;
    db::ensure_schema(&pool).await?;

    let app = api_rest::router(api_rest::AppState::new(pool));

    let listener = tokio::net::TcpListener::bind(cfg.rest_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
