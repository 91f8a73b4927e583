//! Student domain types.

use serde::{Deserialize, Serialize};

use student_records_core::{Age, Grade, StudentFieldError, StudentId, StudentName};

/// A student row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    /// Store-assigned, immutable identifier.
    pub id: StudentId,
    /// Display name (plain text, markup already stripped).
    pub name: String,
    /// Age in years.
    pub age: i64,
    /// Grade or class code.
    pub grade: String,
}

/// Raw add/edit form submission.
///
/// Every field is taken as a string so that a non-numeric age becomes a
/// validation message instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub grade: String,
}

/// Validated student fields, ready to be bound into an INSERT or UPDATE.
#[derive(Debug, Clone)]
pub struct StudentInput {
    pub name: StudentName,
    pub age: Age,
    pub grade: Grade,
}

impl StudentInput {
    /// Validate raw field values.
    ///
    /// # Errors
    ///
    /// Returns the first [`StudentFieldError`] found, checking name, age and
    /// grade in that order.
    pub fn parse(name: &str, age: &str, grade: &str) -> Result<Self, StudentFieldError> {
        Ok(Self {
            name: StudentName::parse(name)?,
            age: Age::parse(age)?,
            grade: Grade::parse(grade)?,
        })
    }
}

impl TryFrom<&StudentForm> for StudentInput {
    type Error = StudentFieldError;

    fn try_from(form: &StudentForm) -> Result<Self, Self::Error> {
        Self::parse(&form.name, &form.age, &form.grade)
    }
}

impl From<&Student> for StudentForm {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            age: student.age.to_string(),
            grade: student.grade.clone(),
        }
    }
}
