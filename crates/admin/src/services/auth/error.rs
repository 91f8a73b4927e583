//! Admin authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password or unknown username. Callers must not tell these apart.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Invalid username format.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] student_records_core::UsernameError),

    /// Admin already exists.
    #[error("admin already exists")]
    AdminAlreadyExists,

    /// Admin not found (account management only; login reports `InvalidCredentials`).
    #[error("admin not found")]
    AdminNotFound,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// The blocking task running Argon2 panicked or was cancelled.
    #[error("password task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
