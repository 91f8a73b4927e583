//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! sr-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `SQLite` connection string (default: `sqlite://instance/students.db`)
//!
//! # Migration Files
//!
//! Schema migrations live in `crates/admin/migrations/`; the session table is
//! created by the session store.

use super::{CommandError, connect};

/// Run all database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be opened or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    tracing::info!("Running migrations...");
    let pool = connect().await?;
    pool.close().await;

    tracing::info!("Migrations complete!");
    Ok(())
}
