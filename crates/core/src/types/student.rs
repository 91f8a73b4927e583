//! Validated student fields.
//!
//! Form input is untrusted. Each field type below can only be built through
//! its `parse` constructor, which strips markup from free text and enforces
//! the column limits of the `student` table.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::markup::strip_markup;

/// Errors that can occur when parsing a student field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StudentFieldError {
    /// The field is empty (after markup was stripped).
    #[error("{field} cannot be empty")]
    Empty {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The field is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },
    /// The field still contains angle brackets after markup was stripped.
    #[error("{field} must not contain markup")]
    Markup {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The age is not a whole number.
    #[error("age must be a whole number")]
    AgeNotANumber,
    /// The age is outside the accepted range.
    #[error("age must be between {min} and {max}")]
    AgeOutOfRange {
        /// Smallest accepted age.
        min: i64,
        /// Largest accepted age.
        max: i64,
    },
}

/// Strip markup, trim, and enforce the length and bracket rules.
fn clean_text(
    field: &'static str,
    raw: &str,
    max: usize,
) -> Result<String, StudentFieldError> {
    let text = strip_markup(raw).trim().to_owned();

    if text.is_empty() {
        return Err(StudentFieldError::Empty { field });
    }

    if text.chars().count() > max {
        return Err(StudentFieldError::TooLong { field, max });
    }

    if text.contains(['<', '>']) {
        return Err(StudentFieldError::Markup { field });
    }

    Ok(text)
}

/// A student's display name.
///
/// ## Constraints
///
/// - Markup is stripped, surrounding whitespace trimmed
/// - Length: 1-100 characters
/// - Never contains `<` or `>`
///
/// ## Examples
///
/// ```
/// use student_records_core::StudentName;
///
/// assert_eq!(StudentName::parse("<b>Ada</b>").unwrap().as_str(), "Ada");
/// assert!(StudentName::parse("   ").is_err());
/// assert!(StudentName::parse("<script>x</script>").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub struct StudentName(String);

impl StudentName {
    /// Maximum length of a name, in characters.
    pub const MAX_LENGTH: usize = 100;

    /// Parse a `StudentName` from raw form input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty after stripping markup, longer
    /// than 100 characters, or still contains angle brackets.
    pub fn parse(s: &str) -> Result<Self, StudentFieldError> {
        clean_text("name", s, Self::MAX_LENGTH).map(Self)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `StudentName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for StudentName {
    type Error = StudentFieldError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<StudentName> for String {
    fn from(name: StudentName) -> Self {
        name.0
    }
}

impl fmt::Display for StudentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A student's grade, a short code such as `10A` or `B+`.
///
/// Same rules as [`StudentName`] with a 10 character limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub struct Grade(String);

impl Grade {
    /// Maximum length of a grade code, in characters.
    pub const MAX_LENGTH: usize = 10;

    /// Parse a `Grade` from raw form input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty after stripping markup, longer
    /// than 10 characters, or still contains angle brackets.
    pub fn parse(s: &str) -> Result<Self, StudentFieldError> {
        clean_text("grade", s, Self::MAX_LENGTH).map(Self)
    }

    /// Returns the grade as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Grade` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Grade {
    type Error = StudentFieldError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A student's age in whole years.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "i64", try_from = "i64")]
pub struct Age(i64);

impl Age {
    /// Smallest accepted age.
    pub const MIN: i64 = 1;
    /// Largest accepted age.
    pub const MAX: i64 = 150;

    /// Parse an `Age` from raw form input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a whole number or lies outside
    /// 1-150.
    pub fn parse(s: &str) -> Result<Self, StudentFieldError> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| StudentFieldError::AgeNotANumber)?;
        Self::new(value)
    }

    /// Build an `Age` from an integer.
    ///
    /// # Errors
    ///
    /// Returns `StudentFieldError::AgeOutOfRange` if the value lies outside 1-150.
    pub const fn new(value: i64) -> Result<Self, StudentFieldError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(StudentFieldError::AgeOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Age {
    type Error = StudentFieldError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Age> for i64 {
    fn from(age: Age) -> Self {
        age.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_name_plain() {
        let name = StudentName::parse("  Ada Lovelace ").unwrap();
        assert_eq!(name.as_str(), "Ada Lovelace");
    }

    #[test]
    fn test_name_strips_markup() {
        let name = StudentName::parse("<script>alert(1)</script><b>Ada</b>").unwrap();
        assert_eq!(name.as_str(), "Ada");
    }

    #[test]
    fn test_name_only_markup_is_empty() {
        assert_eq!(
            StudentName::parse("<script>alert(1)</script>"),
            Err(StudentFieldError::Empty { field: "name" })
        );
    }

    #[test]
    fn test_name_too_long() {
        assert!(StudentName::parse(&"a".repeat(100)).is_ok());
        assert_eq!(
            StudentName::parse(&"a".repeat(101)),
            Err(StudentFieldError::TooLong {
                field: "name",
                max: 100
            })
        );
    }

    #[test]
    fn test_name_length_counts_characters() {
        assert!(StudentName::parse(&"é".repeat(100)).is_ok());
    }

    #[test]
    fn test_name_rejects_encoded_markup() {
        assert_eq!(
            StudentName::parse("&lt;script&gt;"),
            Err(StudentFieldError::Markup { field: "name" })
        );
    }

    #[test]
    fn test_name_keeps_quotes() {
        let name = StudentName::parse("O'Brien").unwrap();
        assert_eq!(name.as_str(), "O'Brien");
    }

    #[test]
    fn test_grade() {
        assert_eq!(Grade::parse("10A").unwrap().as_str(), "10A");
        assert_eq!(Grade::parse("<i>B+</i>").unwrap().as_str(), "B+");
        assert!(matches!(
            Grade::parse("ABCDEFGHIJK"),
            Err(StudentFieldError::TooLong { field: "grade", .. })
        ));
        assert!(matches!(
            Grade::parse(""),
            Err(StudentFieldError::Empty { field: "grade" })
        ));
    }

    #[test]
    fn test_age() {
        assert_eq!(Age::parse(" 17 ").unwrap().get(), 17);
        assert_eq!(Age::parse("abc"), Err(StudentFieldError::AgeNotANumber));
        assert_eq!(
            Age::parse("17; DROP TABLE student"),
            Err(StudentFieldError::AgeNotANumber)
        );
        assert!(matches!(
            Age::parse("0"),
            Err(StudentFieldError::AgeOutOfRange { .. })
        ));
        assert!(matches!(
            Age::parse("151"),
            Err(StudentFieldError::AgeOutOfRange { .. })
        ));
        assert!(Age::parse("150").is_ok());
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let name: StudentName = serde_json::from_str(r#""<b>Ada</b>""#).unwrap();
        assert_eq!(name.as_str(), "Ada");
        assert!(serde_json::from_str::<StudentName>(r#""<script>x</script>""#).is_err());
        let too_long = format!("\"{}\"", "a".repeat(101));
        assert!(serde_json::from_str::<StudentName>(&too_long).is_err());

        assert!(serde_json::from_str::<Grade>(r#""ABCDEFGHIJK""#).is_err());
        assert!(serde_json::from_str::<Grade>(r#""&lt;i&gt;""#).is_err());

        assert_eq!(serde_json::from_str::<Age>("17").unwrap().get(), 17);
        assert!(serde_json::from_str::<Age>("0").is_err());
        assert!(serde_json::from_str::<Age>("151").is_err());
    }

    #[test]
    fn test_serialize_is_plain_value() {
        let name = StudentName::parse("Ada").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), r#""Ada""#);
        assert_eq!(serde_json::to_string(&Age::new(17).unwrap()).unwrap(), "17");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StudentFieldError::Empty { field: "name" }.to_string(),
            "name cannot be empty"
        );
        assert_eq!(
            StudentFieldError::AgeOutOfRange { min: 1, max: 150 }.to_string(),
            "age must be between 1 and 150"
        );
    }
}
