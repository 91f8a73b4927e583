//! Student repository for database operations.
//!
//! One method per statement the panel issues. Values arrive here already
//! validated (see [`crate::models::student::StudentInput`]) and are passed as
//! bind parameters; the `id` column is never written by an UPDATE.

use sqlx::SqlitePool;

use student_records_core::StudentId;

use super::RepositoryError;
use crate::models::student::{Student, StudentInput};

/// Internal row type for `SQLite` student queries.
#[derive(Debug, sqlx::FromRow)]
struct StudentRow {
    id: i64,
    name: String,
    age: i64,
    grade: String,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: StudentId::new(row.id),
            name: row.name,
            age: row.age,
            grade: row.grade,
        }
    }
}

/// Repository for student database operations.
pub struct StudentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StudentRepository<'a> {
    /// Create a new student repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all students ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Student>, RepositoryError> {
        let rows = sqlx::query_as::<_, StudentRow>(
            "SELECT id, name, age, grade FROM student ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Student::from).collect())
    }

    /// Get a student by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: StudentId) -> Result<Option<Student>, RepositoryError> {
        let row = sqlx::query_as::<_, StudentRow>(
            "SELECT id, name, age, grade FROM student WHERE id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Student::from))
    }

    /// Insert a new student; the store assigns the ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &StudentInput) -> Result<Student, RepositoryError> {
        let row = sqlx::query_as::<_, StudentRow>(
            "INSERT INTO student (name, age, grade) VALUES (?, ?, ?) \
             RETURNING id, name, age, grade",
        )
        .bind(input.name.as_str())
        .bind(input.age.get())
        .bind(input.grade.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a student's name, age, and grade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no student has this ID.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: StudentId,
        input: &StudentInput,
    ) -> Result<Student, RepositoryError> {
        let row = sqlx::query_as::<_, StudentRow>(
            "UPDATE student SET name = ?, age = ?, grade = ? WHERE id = ? \
             RETURNING id, name, age, grade",
        )
        .bind(input.name.as_str())
        .bind(input.age.get())
        .bind(input.grade.as_str())
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(Student::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete a student by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the student was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: StudentId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM student WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
