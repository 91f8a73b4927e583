//! Admin credential repository for database operations.
//!
//! Only password hashes ever reach this table; hashing happens in
//! [`crate::services::auth`] before any write.

use sqlx::SqlitePool;

use student_records_core::Username;

use super::{RepositoryError, map_unique_violation};
use crate::models::admin::Admin;

/// Internal row type for `SQLite` admin queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    username: String,
    password_hash: String,
}

impl TryFrom<AdminRow> for Admin {
    type Error = RepositoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;

        Ok(Self {
            username,
            password_hash: row.password_hash,
        })
    }
}

/// Repository for admin credential database operations.
pub struct AdminRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an admin (with password hash) by username.
    ///
    /// The username is the only lookup key; the password is never part of
    /// the query and is verified by the caller against the returned hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored username is invalid.
    pub async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            "SELECT username, password_hash FROM admin WHERE username = ?",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new admin with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO admin (username, password_hash) VALUES (?, ?)")
            .bind(username.as_str())
            .bind(password_hash)
            .execute(self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "admin"))?;

        Ok(())
    }

    /// Replace an admin's password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the admin doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_password_hash(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE admin SET password_hash = ? WHERE username = ?")
            .bind(password_hash)
            .bind(username.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Count admins (used to warn when no one can log in).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;

    #[tokio::test]
    async fn test_create_and_get() {
        let (pool, _dir) = test_pool().await;
        let repo = AdminRepository::new(&pool);
        let username = Username::parse("admin").unwrap();

        repo.create(&username, "$argon2id$fake").await.unwrap();

        let admin = repo.get_by_username(&username).await.unwrap().unwrap();
        assert_eq!(admin.username, username);
        assert_eq!(admin.password_hash, "$argon2id$fake");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_plaintext_password_is_rejected_by_schema() {
        let (pool, _dir) = test_pool().await;
        let repo = AdminRepository::new(&pool);

        let err = repo
            .create(&Username::parse("admin").unwrap(), "hunter2")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Database(_)));
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let (pool, _dir) = test_pool().await;
        let repo = AdminRepository::new(&pool);

        let missing = repo
            .get_by_username(&Username::parse("nobody").unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let (pool, _dir) = test_pool().await;
        let repo = AdminRepository::new(&pool);
        let username = Username::parse("admin").unwrap();

        repo.create(&username, "$argon2id$hash-1").await.unwrap();
        let err = repo.create(&username, "$argon2id$hash-2").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_password_hash() {
        let (pool, _dir) = test_pool().await;
        let repo = AdminRepository::new(&pool);
        let username = Username::parse("admin").unwrap();

        repo.create(&username, "$argon2id$old").await.unwrap();
        repo.update_password_hash(&username, "$argon2id$new").await.unwrap();

        let admin = repo.get_by_username(&username).await.unwrap().unwrap();
        assert_eq!(admin.password_hash, "$argon2id$new");

        let err = repo
            .update_password_hash(&Username::parse("ghost").unwrap(), "$argon2id$x")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
