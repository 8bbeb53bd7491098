use georecord_core::pagination::{DEFAULT_CATEGORY_LIMIT, DEFAULT_RECORD_LIMIT, MAX_LIST_LIMIT};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for in-flight requests to drain after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Page size when a record listing omits `limit`.
    pub record_default_limit: i64,
    /// Page size when a category listing omits `limit`.
    pub category_default_limit: i64,
    /// Upper bound on any `limit`.
    pub max_limit: i64,
    pub jwt: JwtConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                    |
    /// |-------------------------------|----------------------------|
    /// | `HOST`                        | `0.0.0.0`                  |
    /// | `PORT`                        | `3000`                     |
    /// | `CORS_ORIGINS`                | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`       | `30`                       |
    /// | `RECORD_LIST_DEFAULT_LIMIT`   | `50`                       |
    /// | `CATEGORY_LIST_DEFAULT_LIMIT` | `250`                      |
    /// | `LIST_MAX_LIMIT`              | `1000`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host,
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            record_default_limit: env_or("RECORD_LIST_DEFAULT_LIMIT", DEFAULT_RECORD_LIMIT),
            category_default_limit: env_or("CATEGORY_LIST_DEFAULT_LIMIT", DEFAULT_CATEGORY_LIMIT),
            max_limit: env_or("LIST_MAX_LIMIT", MAX_LIST_LIMIT),
            jwt: JwtConfig::from_env(),
        }
    }
}
