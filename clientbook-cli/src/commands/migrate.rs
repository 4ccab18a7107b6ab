//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use clientbook_server::db::{create_pool, migrations};

use crate::config::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DatabaseArgs,
}

/// Create the clients and contacts tables if they are missing
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&args.db.to_config())
        .await
        .context("Failed to connect to database")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    println!("migrations executed successfully");
    Ok(())
}
