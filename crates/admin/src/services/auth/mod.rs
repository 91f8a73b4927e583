//! Admin authentication service.
//!
//! Password authentication against Argon2id hashes stored in the `admin`
//! table. The lookup binds only the username; the password is checked
//! against the returned hash in constant time by `argon2`.
//!
//! Argon2 is CPU-bound, so the service runs it on the blocking thread pool.

mod error;

pub use error::AuthError;

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use student_records_core::Username;

use crate::db::RepositoryError;
use crate::db::admins::AdminRepository;
use crate::models::session::CurrentAdmin;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash verified when the username is unknown, so that a miss costs the same
/// as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("timing-equalization-only").ok());

/// Admin authentication service.
pub struct AuthService<'a> {
    admins: AdminRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            admins: AdminRepository::new(pool),
        }
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is malformed,
    /// unknown, or the password does not match.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<CurrentAdmin, AuthError> {
        let Ok(username) = Username::parse(username) else {
            burn_dummy_verification(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        let Some(admin) = self.admins.get_by_username(&username).await? else {
            burn_dummy_verification(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        let password = password.to_owned();
        let hash = admin.password_hash;
        tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;

        Ok(CurrentAdmin::new(admin.username))
    }

    /// Create an admin account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` or `AuthError::WeakPassword` for bad input.
    /// Returns `AuthError::AdminAlreadyExists` if the username is taken.
    pub async fn create_admin(&self, username: &str, password: &str) -> Result<Username, AuthError> {
        let username = Username::parse(username)?;
        validate_password(password)?;
        let password_hash = hash_password_blocking(password).await?;

        self.admins
            .create(&username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::AdminAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(username)
    }

    /// Replace an admin's password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` or `AuthError::WeakPassword` for bad input.
    /// Returns `AuthError::AdminNotFound` if no such admin exists.
    pub async fn set_password(&self, username: &str, password: &str) -> Result<Username, AuthError> {
        let username = Username::parse(username)?;
        validate_password(password)?;
        let password_hash = hash_password_blocking(password).await?;

        self.admins
            .update_password_hash(&username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::AdminNotFound,
                other => AuthError::Repository(other),
            })?;

        Ok(username)
    }
}

// =============================================================================
// Password helpers
// =============================================================================

/// Validate password requirements.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is shorter than
/// [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a PHC hash string.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the hash is malformed or the
/// password does not match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// [`hash_password`] on the blocking thread pool.
async fn hash_password_blocking(password: &str) -> Result<String, AuthError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

async fn burn_dummy_verification(password: &str) -> Result<(), AuthError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || {
        if let Some(hash) = DUMMY_HASH.as_deref() {
            let _ = verify_password(&password, hash);
        }
    })
    .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;

    #[test]
    fn test_hash_is_argon2id_and_salted() {
        let first = hash_password("correct horse").unwrap();
        let second = hash_password("correct horse").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
        assert!(!first.contains("correct horse"));
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("correct horse").unwrap();

        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong horse", &hash),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            verify_password("correct horse", "correct horse"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("12345678").is_ok());
        assert!(matches!(
            validate_password("1234567"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[tokio::test]
    async fn test_hash_password_blocking_matches_sync_verify() {
        let hash = hash_password_blocking("correct horse").await.unwrap();
        assert!(verify_password("correct horse", &hash).is_ok());
    }

    #[tokio::test]
    async fn test_login() {
        let (pool, _dir) = test_pool().await;
        let auth = AuthService::new(&pool);
        auth.create_admin("admin", "s3cret-pass").await.unwrap();

        let current = auth.login("admin", "s3cret-pass").await.unwrap();
        assert_eq!(current.username.as_str(), "admin");

        assert!(matches!(
            auth.login("admin", "wrong-pass").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody", "s3cret-pass").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_injection_shaped_username_is_rejected() {
        let (pool, _dir) = test_pool().await;
        let auth = AuthService::new(&pool);
        auth.create_admin("admin", "s3cret-pass").await.unwrap();

        assert!(matches!(
            auth.login("admin' --", "anything").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("' OR '1'='1", "' OR '1'='1").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_create_admin_stores_hash_only() {
        let (pool, _dir) = test_pool().await;
        let auth = AuthService::new(&pool);
        auth.create_admin("admin", "s3cret-pass").await.unwrap();

        let stored = AdminRepository::new(&pool)
            .get_by_username(&Username::parse("admin").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(stored.password_hash.starts_with("$argon2id$"));
        assert_ne!(stored.password_hash, "s3cret-pass");

        assert!(matches!(
            auth.create_admin("admin", "another-pass").await,
            Err(AuthError::AdminAlreadyExists)
        ));
        assert!(matches!(
            auth.create_admin("second", "short").await,
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[tokio::test]
    async fn test_set_password() {
        let (pool, _dir) = test_pool().await;
        let auth = AuthService::new(&pool);
        auth.create_admin("admin", "first-pass").await.unwrap();

        auth.set_password("admin", "second-pass").await.unwrap();
        assert!(auth.login("admin", "first-pass").await.is_err());
        assert!(auth.login("admin", "second-pass").await.is_ok());

        assert!(matches!(
            auth.set_password("ghost", "whatever-pass").await,
            Err(AuthError::AdminNotFound)
        ));
    }
}
