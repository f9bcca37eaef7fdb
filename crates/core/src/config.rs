//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in multi-threaded runtimes
//! and test harnesses. The `*_from_env_value` helpers take the raw `Option<String>` so they can
//! be unit-tested without touching the environment.

use crate::{PatientError, PatientResult};

/// Connection parameters for the relational store.
#[derive(Clone, Debug)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub pool_size: u32,
}

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    rest_addr: String,
    db: DbConfig,
}

impl CoreConfig {
    /// Resolves the full configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if `DB_PORT` or `DB_POOL_SIZE`
    /// are present but not parseable.
    pub fn from_env() -> PatientResult<Self> {
        Ok(Self {
            rest_addr: string_from_env_value(
                std::env::var("RECORDS_REST_ADDR").ok(),
                "0.0.0.0:8000",
            ),
            db: DbConfig {
                host: string_from_env_value(std::env::var("DB_HOST").ok(), "127.0.0.1"),
                port: number_from_env_value("DB_PORT", std::env::var("DB_PORT").ok(), 5432)?,
                name: string_from_env_value(std::env::var("DB_NAME").ok(), "patientdb"),
                user: string_from_env_value(std::env::var("DB_USER").ok(), "appuser"),
                password: string_from_env_value(std::env::var("DB_PASS").ok(), "password"),
                pool_size: number_from_env_value(
                    "DB_POOL_SIZE",
                    std::env::var("DB_POOL_SIZE").ok(),
                    10,
                )?,
            },
        })
    }

    /// Address the REST listener binds to.
    pub fn rest_addr(&self) -> &str {
        &self.rest_addr
    }

    /// Store connection parameters.
    pub fn db(&self) -> &DbConfig {
        &self.db
    }
}

/// Resolves a string setting, falling back to `default` when the variable is
/// unset or blank.
fn string_from_env_value(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parses a numeric setting, falling back to `default` when the variable is
/// unset or blank.
fn number_from_env_value<N>(
    field: &'static str,
    value: Option<String>,
    default: N,
) -> PatientResult<N>
where
    N: std::str::FromStr,
{
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            PatientError::InvalidInput(format!("{field}: `{raw}` is not a valid number"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_setting_falls_back_when_unset_or_blank() {
        assert_eq!(string_from_env_value(None, "127.0.0.1"), "127.0.0.1");
        assert_eq!(
            string_from_env_value(Some("  ".to_string()), "127.0.0.1"),
            "127.0.0.1"
        );
        assert_eq!(
            string_from_env_value(Some(" db.internal ".to_string()), "127.0.0.1"),
            "db.internal"
        );
    }

    #[test]
    fn test_number_setting_parses_and_falls_back() {
        assert_eq!(
            number_from_env_value::<u16>("DB_PORT", None, 5432).unwrap(),
            5432
        );
        assert_eq!(
            number_from_env_value::<u16>("DB_PORT", Some("5433".to_string()), 5432).unwrap(),
            5433
        );
        assert_eq!(
            number_from_env_value::<u16>("DB_PORT", Some("".to_string()), 5432).unwrap(),
            5432
        );
    }

    #[test]
    fn test_number_setting_rejects_garbage() {
        let err = number_from_env_value::<u16>("DB_PORT", Some("not-a-port".to_string()), 5432)
            .expect_err("should reject non-numeric input");

        assert!(
            err.to_string().contains("DB_PORT"),
            "should name the offending variable, got: {err}"
        );
    }
}
