//! # Sunyi Config
//!
//! Configuration types for the Sunyi API.
//!
//! Every section is loaded from environment variables. Sections whose values
//! protect an invariant (the signing secret, the token lifetime, the bcrypt
//! cost) refuse to load on bad input instead of falling back, so the process
//! stops at startup rather than issuing tokens that never expire.
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: Token signing secret and lifetime
//! - [`password`]: bcrypt cost factor
//! - [`server`]: Listen port, metrics port, environment name
//!
//! # Example
//!
//! ```ignore
//! use sunyi_config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.server.port);
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod password;
pub mod server;

use thiserror::Error;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::{JwtConfig, parse_duration};
pub use password::PasswordConfig;
pub use server::ServerConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{key} has an invalid value `{value}`: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Reads a variable, treating an empty value as unset.
pub(crate) fn lookup<F>(get: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    get(key).filter(|v| !v.trim().is_empty())
}

pub(crate) fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// All configuration sections the server needs.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_var)
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(&get)?,
            database: DatabaseConfig::from_lookup(&get)?,
            jwt: JwtConfig::from_lookup(&get)?,
            password: PasswordConfig::from_lookup(&get)?,
            cors: CorsConfig::from_lookup(&get),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_full_config_loads_with_defaults() {
        let config = AppConfig::from_lookup(source(&[
            ("DATABASE_URL", "postgres://localhost/sunyi"),
            ("JWT_SECRET", "a-very-secret-signing-key"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.jwt.ttl.as_secs(), 24 * 3600);
        assert_eq!(config.password.bcrypt_cost, 12);
        assert_eq!(config.database.max_connections, 25);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let err = AppConfig::from_lookup(source(&[("DATABASE_URL", "postgres://localhost/sunyi")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_missing_database_url_is_fatal() {
        let err = AppConfig::from_lookup(source(&[("JWT_SECRET", "secret")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let err = AppConfig::from_lookup(source(&[
            ("DATABASE_URL", "postgres://localhost/sunyi"),
            ("JWT_SECRET", "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("JWT_SECRET"));
    }
}
