use crate::diagnostics::MAX_DIAGNOSTIC_MS;
use crate::utils::{AppError, ErrorCode};
use std::str::FromStr;

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden through the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | DATABASE_PATH | {WORK_DIR}/hr.db | SQLite database file |
/// | DB_MAX_CONNECTIONS | 5 | Connection pool size |
/// | HTTP_PORT | 8080 | HTTP listen port |
/// | ENVIRONMENT | development | development / production |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | (unset) | Enables daily rolling log files |
/// | LOG_JSON | false | JSON log lines |
/// | SEED_DEMO_DATA | true | Seed departments and demo employees on startup |
/// | REQUEST_TIMEOUT_MS | 30000 | Outer HTTP request timeout |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/hr HTTP_PORT=9000 cargo run -p hr-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory, holds the database and logs
    pub work_dir: String,
    pub database_path: String,
    pub db_max_connections: u32,
    pub http_port: u16,
    /// development | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
    pub seed_demo_data: bool,
    /// Must stay above the diagnostic ceiling, or slow diagnostics are cut short
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let work_dir = var("WORK_DIR").unwrap_or_else(|| "./data".into());
        let database_path = var("DATABASE_PATH").unwrap_or_else(|| format!("{work_dir}/hr.db"));

        Self {
            database_path,
            db_max_connections: parsed(&var, "DB_MAX_CONNECTIONS", 5),
            http_port: parsed(&var, "HTTP_PORT", 8080),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: var("LOG_DIR").filter(|d| !d.trim().is_empty()),
            log_json: parsed(&var, "LOG_JSON", false),
            seed_demo_data: parsed(&var, "SEED_DEMO_DATA", true),
            request_timeout_ms: parsed(&var, "REQUEST_TIMEOUT_MS", 30_000),
            work_dir,
        }
    }

    /// Reject combinations the server cannot run with
    pub fn validate(&self) -> Result<(), AppError> {
        if self.request_timeout_ms <= MAX_DIAGNOSTIC_MS {
            return Err(AppError::with_message(
                ErrorCode::ConfigError,
                format!(
                    "REQUEST_TIMEOUT_MS must exceed {MAX_DIAGNOSTIC_MS} ms, got {}",
                    self.request_timeout_ms
                ),
            ));
        }
        if self.db_max_connections == 0 {
            return Err(AppError::with_message(
                ErrorCode::ConfigError,
                "DB_MAX_CONNECTIONS must be at least 1",
            ));
        }
        Ok(())
    }

    /// Whether this is a production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether this is a development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

fn parsed<F, T>(var: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    var(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
