//! `sr-cli` subcommands.

pub mod admin;
pub mod migrate;

use sqlx::SqlitePool;
use thiserror::Error;

use student_records_admin::config::{AdminConfig, ConfigError};
use student_records_admin::db::{self, MigrationError};
use student_records_admin::services::AuthError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("{0}")]
    Migration(#[from] MigrationError),

    /// Admin account operation failed.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Load `DATABASE_URL` (and `.env`) and open a migrated pool.
///
/// Migrations are idempotent, so account commands work on a fresh database.
async fn connect() -> Result<SqlitePool, CommandError> {
    let config = AdminConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;
    db::migrate(&pool).await?;

    Ok(pool)
}
