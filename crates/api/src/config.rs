use std::path::PathBuf;
use std::str::FromStr;

use axum::http::HeaderValue;

/// Default request body limit (10 MiB).
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Which store implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL via `pricebook-db` (requires `DATABASE_URL`).
    Postgres,
    /// Process-local in-memory store; data is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

/// An environment variable held a value that could not be used.
#[derive(Debug, thiserror::Error)]
#[error("{var} must be {expected}, got '{value}'")]
pub struct ConfigError {
    pub var: &'static str,
    pub expected: &'static str,
    pub value: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Maximum accepted request body size.
    pub body_limit_bytes: usize,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub store_backend: StoreBackend,
    /// JSON array of catalog products upserted at startup.
    pub catalog_seed_path: Option<PathBuf>,
    /// Emit JSON log lines instead of the human-readable format.
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: vec!["http://localhost:3001".to_string()],
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            database_url: None,
            db_max_connections: 20,
            store_backend: StoreBackend::Postgres,
            catalog_seed_path: None,
            log_json: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `HOST`                  | `0.0.0.0`                |
    /// | `PORT`                  | `3000`                   |
    /// | `CORS_ORIGINS`          | `FRONTEND_URL`           |
    /// | `FRONTEND_URL`          | `http://localhost:3001`  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                     |
    /// | `BODY_LIMIT_BYTES`      | `10485760`               |
    /// | `DATABASE_URL`          | unset                    |
    /// | `DB_MAX_CONNECTIONS`    | `20`                     |
    /// | `STORE_BACKEND`         | `postgres`               |
    /// | `CATALOG_SEED_PATH`     | unset                    |
    /// | `LOG_FORMAT`            | text (`json` to switch)  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let cors_origins = match var("CORS_ORIGINS").or_else(|| var("FRONTEND_URL")) {
            Some(raw) => parse_origins(&raw)?,
            None => defaults.cors_origins,
        };

        let store_backend = match var("STORE_BACKEND") {
            Some(raw) => raw.parse().map_err(|_| ConfigError {
                var: "STORE_BACKEND",
                expected: "'postgres' or 'memory'",
                value: raw,
            })?,
            None => defaults.store_backend,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: parse_or(var("PORT"), "PORT", "a valid u16", defaults.port)?,
            cors_origins,
            request_timeout_secs: parse_or(
                var("REQUEST_TIMEOUT_SECS"),
                "REQUEST_TIMEOUT_SECS",
                "a valid u64",
                defaults.request_timeout_secs,
            )?,
            shutdown_timeout_secs: parse_or(
                var("SHUTDOWN_TIMEOUT_SECS"),
                "SHUTDOWN_TIMEOUT_SECS",
                "a valid u64",
                defaults.shutdown_timeout_secs,
            )?,
            body_limit_bytes: parse_or(
                var("BODY_LIMIT_BYTES"),
                "BODY_LIMIT_BYTES",
                "a byte count",
                defaults.body_limit_bytes,
            )?,
            database_url: var("DATABASE_URL"),
            db_max_connections: parse_or(
                var("DB_MAX_CONNECTIONS"),
                "DB_MAX_CONNECTIONS",
                "a valid u32",
                defaults.db_max_connections,
            )?,
            store_backend,
            catalog_seed_path: var("CATALOG_SEED_PATH").map(PathBuf::from),
            log_json: var("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
        })
    }
}

fn parse_or<T: FromStr>(
    raw: Option<String>,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.trim().parse().map_err(|_| ConfigError {
            var,
            expected,
            value,
        }),
        None => Ok(default),
    }
}

/// Split a comma-separated origin list, rejecting values that are not valid
/// header values.
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map(|_| origin.to_string())
                .map_err(|_| ConfigError {
                    var: "CORS_ORIGINS",
                    expected: "a comma-separated list of origins",
                    value: origin.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:3001"]);
        assert_eq!(config.body_limit_bytes, DEFAULT_BODY_LIMIT_BYTES);
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert!(!config.log_json);
    }

    #[test]
    fn frontend_url_is_the_fallback_origin() {
        let config = load(&[("FRONTEND_URL", "https://shop.example")]).unwrap();
        assert_eq!(config.cors_origins, vec!["https://shop.example"]);

        let config = load(&[
            ("FRONTEND_URL", "https://shop.example"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
        ])
        .unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn invalid_port_is_reported_by_name() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.var, "PORT");
        assert_eq!(err.value, "eighty");
    }

    #[test]
    fn store_backend_and_log_format_are_parsed() {
        let config = load(&[("STORE_BACKEND", "Memory"), ("LOG_FORMAT", "JSON")]).unwrap();
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(config.log_json);

        assert!(load(&[("STORE_BACKEND", "mongo")]).is_err());
    }
}
