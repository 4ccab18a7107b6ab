//! HTTP server command
//!
//! Builds the pool (verifying connectivity), optionally migrates, then
//! serves until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use clientbook_server::db::{create_pool, migrations};
use clientbook_server::http::{run_server, ServerConfig};

use crate::config::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "CLIENTBOOK_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Abort requests that take longer than this many seconds
    #[arg(long, env = "CLIENTBOOK_REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Run schema migrations before accepting traffic
    #[arg(long)]
    pub migrate: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = args.db.to_config();

    let pool = create_pool(&db_config)
        .await
        .context("Failed to connect to database")?;

    if args.migrate {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.request_timeout),
    };

    tracing::info!("Starting clientbook server on {}", config.bind_addr);

    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
