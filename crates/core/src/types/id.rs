//! Newtype ID for student rows.
//!
//! Student IDs are assigned by the store (`INTEGER PRIMARY KEY`) and never
//! change afterwards. The wrapper keeps them from being mixed up with ages or
//! other integers that flow through the same handlers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a student row.
///
/// Deserializes transparently from an integer, so it can be used directly as
/// an axum `Path` parameter: a non-numeric path segment is rejected before any
/// handler (or query) runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(i64);

impl StudentId {
    /// Create a new ID from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for StudentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<StudentId> for i64 {
    fn from(id: StudentId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(StudentId::new(42).to_string(), "42");
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&StudentId::new(7)).unwrap();
        assert_eq!(json, "7");

        let parsed: StudentId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, StudentId::new(7));
    }

    #[test]
    fn test_rejects_non_integer() {
        assert!(serde_json::from_str::<StudentId>("\"1 OR 1=1\"").is_err());
    }

    #[test]
    fn test_conversions() {
        let id = StudentId::from(3);
        let raw: i64 = id.into();
        assert_eq!(raw, 3);
        assert_eq!(id.as_i64(), 3);
    }
}
