//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. A `.env` file in the working directory is read first if present.
//!
//! | Variable             | Default       |
//! |----------------------|---------------|
//! | `HOST`               | `0.0.0.0`     |
//! | `PORT`               | `8080`        |
//! | `DATABASE_PATH`      | `./kasir.db`  |
//! | `DB_MAX_CONNECTIONS` | `5`           |
//! | `DB_BUSY_TIMEOUT_MS` | `5000`        |

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use kasir_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: IpAddr,

    /// HTTP port
    pub port: u16,

    /// SQLite database file, or `:memory:`
    pub database_path: String,

    /// Pool size
    pub db_max_connections: u32,

    /// How long a write waits for the SQLite lock
    pub db_busy_timeout: Duration,
}

impl ApiConfig {
    /// Load configuration from the environment (and `.env`, if any).
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is the normal case in production
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            host: parse(&lookup, "HOST", "0.0.0.0")?,
            port: parse(&lookup, "PORT", "8080")?,
            database_path: lookup("DATABASE_PATH").unwrap_or_else(|| "./kasir.db".to_string()),
            db_max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", "5")?,
            db_busy_timeout: Duration::from_millis(parse(&lookup, "DB_BUSY_TIMEOUT_MS", "5000")?),
        };

        if config.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("DATABASE_PATH".to_string()));
        }
        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Socket address to listen on.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Pool settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        let config = DbConfig::new(&self.database_path);
        if config.is_in_memory() {
            // A second connection would see a different, empty database
            return DbConfig::in_memory().busy_timeout(self.db_busy_timeout);
        }

        config
            .max_connections(self.db_max_connections)
            .busy_timeout(self.db_busy_timeout)
    }
}

fn parse<F, T>(lookup: &F, name: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(name)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.database_path, "./kasir.db");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_busy_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("DATABASE_PATH", "/var/lib/kasir/kasir.db"),
            ("DB_MAX_CONNECTIONS", "8"),
            ("DB_BUSY_TIMEOUT_MS", "250"),
        ])
        .unwrap();

        assert_eq!(config.addr().to_string(), "127.0.0.1:3000");

        let db = config.db_config();
        assert_eq!(db.max_connections, 8);
        assert_eq!(db.busy_timeout, Duration::from_millis(250));
        assert!(!db.is_in_memory());
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = from_pairs(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref name) if name == "PORT"));

        let err = from_pairs(&[("DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for DB_MAX_CONNECTIONS");
    }

    #[test]
    fn test_in_memory_uses_single_connection() {
        let config = from_pairs(&[("DATABASE_PATH", ":memory:"), ("DB_MAX_CONNECTIONS", "8")])
            .unwrap();
        let db = config.db_config();
        assert!(db.is_in_memory());
        assert_eq!(db.max_connections, 1);
    }
}
