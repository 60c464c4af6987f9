//! CLI for applying and inspecting schema migrations
//!
//! Outputs JSON so deploy scripts can parse it.

use std::collections::HashMap;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use skillswap_core::config::Config;
use sqlx::migrate::Migrator;
use sqlx::PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Schema migration CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply all pending migrations
    Run,

    /// List migrations and whether each has been applied
    Status,
}

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<Vec<MigrationInfo>>,
}

#[derive(Serialize)]
struct MigrationInfo {
    version: i64,
    description: String,
    applied: bool,
}

fn print(response: &Response) -> Result<()> {
    println!("{}", serde_json::to_string(response)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Run => {
            MIGRATOR
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            print(&Response {
                success: true,
                message: Some("Migrations applied".to_string()),
                migrations: None,
            })
        }
        Commands::Status => {
            let applied = applied_versions(&pool).await?;
            let migrations = MIGRATOR
                .iter()
                .map(|m| MigrationInfo {
                    version: m.version,
                    description: m.description.to_string(),
                    applied: applied.get(&m.version).copied().unwrap_or(false),
                })
                .collect();
            print(&Response {
                success: true,
                message: None,
                migrations: Some(migrations),
            })
        }
    }
}

/// Versions recorded in sqlx's bookkeeping table, with their success flag
async fn applied_versions(pool: &PgPool) -> Result<HashMap<i64, bool>> {
    let table_exists: bool =
        sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await?;

    if !table_exists {
        return Ok(HashMap::new());
    }

    let rows: Vec<(i64, bool)> = sqlx::query_as("SELECT version, success FROM _sqlx_migrations")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().collect())
}
