//! Database operations for the student records `SQLite` store.
//!
//! ## Tables
//!
//! - `student` - Student rows (`id`, `name`, `age`, `grade`)
//! - `admin` - Administrator credentials (`username`, `password_hash`)
//! - `tower_sessions` - Session storage (created by the session store)
//!
//! Every statement in this module passes user-supplied values as bind
//! parameters (`?`). Query text is always a string literal.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run at startup or via:
//! ```bash
//! cargo run -p student-records-cli -- migrate
//! ```

pub mod admins;
pub mod students;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;
use tower_sessions_sqlx_store::SqliteStore;

pub use admins::AdminRepository;
pub use students::StudentRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Errors that can occur while migrating the database.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Session table migration failed.
    #[error("session store migration error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file and its directory are created if they do not exist yet.
/// Foreign keys are enforced and WAL journaling lets readers proceed during writes.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    // SQLite creates the file but not its directory (e.g. `instance/`).
    if let Some(dir) = options.get_filename().parent()
        && !dir.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(dir).await?;
    }

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Run schema migrations and create the session table.
///
/// Both steps are idempotent.
///
/// # Errors
///
/// Returns `MigrationError` if either migration fails.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrationError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    SqliteStore::new(pool.clone()).migrate().await?;
    Ok(())
}

/// Map a unique-constraint violation to `RepositoryError::Conflict`.
fn map_unique_violation(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}

#[cfg(test)]
pub(crate) mod test_support {
    use secrecy::SecretString;
    use sqlx::SqlitePool;
    use tempfile::TempDir;

    /// Create a migrated pool backed by a file in a fresh temporary directory.
    ///
    /// The directory is removed when the returned guard is dropped.
    #[allow(clippy::expect_used)]
    pub async fn test_pool() -> (SqlitePool, TempDir) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let url = format!("sqlite://{}", dir.path().join("students.db").display());

        let pool = super::create_pool(&SecretString::from(url))
            .await
            .expect("failed to create pool");
        super::migrate(&pool).await.expect("failed to migrate");

        (pool, dir)
    }
}
