//! Server configuration

/// Backend configuration, loaded from environment variables with
/// development-safe defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub database_path: String,
    /// Environment: development | staging | production
    pub environment: String,
    /// Sender address stamped on outgoing mail
    pub mail_from: String,
    /// Delay before the order-confirmation notification fires (ms)
    pub confirmation_delay_ms: i64,
    /// Optional directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/print.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            mail_from: std::env::var("MAIL_FROM").unwrap_or_else(|_| "noreply@imprimerie.mg".into()),
            confirmation_delay_ms: std::env::var("CONFIRMATION_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60_000),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        }
    }
}
