//! Environment-backed configuration
//!
//! Settings come from flags, then the process environment, then `.env.local`
//! and `.env` in the working directory (dotenvy never overwrites variables
//! that are already set).

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use clientbook_server::db::{ConnectionParts, DatabaseConfig, DatabaseUrl};

/// Result of reading one dotenv file
#[derive(Debug)]
pub enum DotenvOutcome {
    Loaded(PathBuf),
    Failed {
        file: &'static str,
        error: dotenvy::Error,
    },
}

/// Load `.env.local` then `.env`; missing files are skipped.
///
/// Runs before the tracing subscriber exists, so outcomes are returned
/// and reported later through [`log_dotenv`].
pub fn load_dotenv() -> Vec<DotenvOutcome> {
    let mut outcomes = Vec::new();
    for file in [".env.local", ".env"] {
        match dotenvy::from_filename(file) {
            Ok(path) => outcomes.push(DotenvOutcome::Loaded(path)),
            Err(e) if e.not_found() => {}
            Err(error) => outcomes.push(DotenvOutcome::Failed { file, error }),
        }
    }
    outcomes
}

pub fn log_dotenv(outcomes: &[DotenvOutcome]) {
    for outcome in outcomes {
        match outcome {
            DotenvOutcome::Loaded(path) => {
                tracing::debug!("Loaded environment from {}", path.display())
            }
            DotenvOutcome::Failed { file, error } => {
                tracing::warn!("Failed to parse {}: {}", file, error)
            }
        }
    }
}

/// Database connection flags shared by `serve` and `migrate`
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Full connection URL; takes precedence over the POSTGRES_* parts
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "POSTGRES_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "POSTGRES_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "POSTGRES_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "POSTGRES_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database name
    #[arg(long, env = "POSTGRES_NAME", default_value = "clientbook")]
    pub db_name: String,

    /// SSL mode (disable, allow, prefer, require, verify-ca, verify-full)
    #[arg(long, env = "POSTGRES_SSL_MODE")]
    pub db_ssl_mode: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "POSTGRES_MAX_CONN", default_value_t = 10)]
    pub db_max_conn: u32,

    /// Connections kept open while idle [default: 0]
    #[arg(long, env = "POSTGRES_MIN_CONN")]
    pub db_min_conn: Option<u32>,

    /// Older name for the idle floor; used when POSTGRES_MIN_CONN is unset
    #[arg(long, env = "POSTGRES_MAX_IDLE", hide = true)]
    pub db_max_idle: Option<u32>,

    /// Seconds before a connection is recycled
    #[arg(long, env = "POSTGRES_MAX_LIFE_TIME", default_value_t = 1800)]
    pub db_max_lifetime: u64,

    /// Seconds to wait for a connection
    #[arg(long, env = "POSTGRES_TIMEOUT", default_value_t = 5)]
    pub db_timeout: u64,
}

impl DatabaseArgs {
    pub fn to_config(&self) -> DatabaseConfig {
        let url = match &self.database_url {
            Some(url) if !url.trim().is_empty() => DatabaseUrl::Url(url.clone()),
            _ => DatabaseUrl::Parts(ConnectionParts {
                host: self.db_host.clone(),
                port: self.db_port,
                user: self.db_user.clone(),
                password: self.db_password.clone(),
                database: self.db_name.clone(),
                ssl_mode: self.db_ssl_mode.clone(),
            }),
        };

        DatabaseConfig {
            max_connections: self.db_max_conn,
            min_connections: self
                .db_min_conn
                .or(self.db_max_idle)
                .unwrap_or(0)
                .min(self.db_max_conn),
            max_lifetime: Duration::from_secs(self.db_max_lifetime),
            acquire_timeout: Duration::from_secs(self.db_timeout),
            ..DatabaseConfig::new(url)
        }
    }
}
