//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin (password from -p or $ADMIN_PASSWORD)
//! sr-cli admin create -u admin
//!
//! # Replace an admin's password
//! sr-cli admin set-password -u admin -p 'new password'
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `SQLite` connection string
//! - `ADMIN_PASSWORD` - Password, when `-p` is not given

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;

use student_records_admin::services::AuthService;

use super::{CommandError, connect};

/// Create a new admin account.
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be opened, the username or
/// password is invalid, or the admin already exists.
pub async fn create(username: &str, password: &SecretString) -> Result<(), CommandError> {
    let pool = connect().await?;
    create_with_pool(&pool, username, password).await?;
    pool.close().await;
    Ok(())
}

/// Replace an existing admin's password.
///
/// # Errors
///
/// Returns `CommandError` if the database cannot be opened, the password is
/// invalid, or the admin does not exist.
pub async fn set_password(username: &str, password: &SecretString) -> Result<(), CommandError> {
    let pool = connect().await?;
    set_password_with_pool(&pool, username, password).await?;
    pool.close().await;
    Ok(())
}

async fn create_with_pool(
    pool: &SqlitePool,
    username: &str,
    password: &SecretString,
) -> Result<(), CommandError> {
    let username = AuthService::new(pool)
        .create_admin(username, password.expose_secret())
        .await?;

    tracing::info!("Admin created successfully! Username: {}", username);
    Ok(())
}

async fn set_password_with_pool(
    pool: &SqlitePool,
    username: &str,
    password: &SecretString,
) -> Result<(), CommandError> {
    let username = AuthService::new(pool)
        .set_password(username, password.expose_secret())
        .await?;

    tracing::info!("Password updated for admin: {}", username);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use student_records_admin::db;
    use student_records_admin::services::AuthError;

    use super::*;

    async fn test_pool() -> (SqlitePool, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("cli.db").display());
        let pool = db::create_pool(&SecretString::from(url)).await.unwrap();
        db::migrate(&pool).await.unwrap();
        (pool, dir)
    }

    #[tokio::test]
    async fn test_create_then_set_password() {
        let (pool, _dir) = test_pool().await;
        let first = SecretString::from("first-password");
        let second = SecretString::from("second-password");

        create_with_pool(&pool, "admin", &first).await.unwrap();
        set_password_with_pool(&pool, "admin", &second).await.unwrap();

        let auth = AuthService::new(&pool);
        assert!(auth.login("admin", "first-password").await.is_err());
        assert!(auth.login("admin", "second-password").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_short_password() {
        let (pool, _dir) = test_pool().await;

        let err = create_with_pool(&pool, "admin", &SecretString::from("short"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Auth(AuthError::WeakPassword(_))));
    }

    #[tokio::test]
    async fn test_set_password_for_unknown_admin() {
        let (pool, _dir) = test_pool().await;

        let err = set_password_with_pool(&pool, "ghost", &SecretString::from("long-enough"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Auth(AuthError::AdminNotFound)));
    }
}
