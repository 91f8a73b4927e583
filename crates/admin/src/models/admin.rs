//! Admin domain types.

use student_records_core::Username;

/// An administrator account as stored (domain type).
///
/// `Debug` is implemented manually so the hash never ends up in logs.
#[derive(Clone)]
pub struct Admin {
    /// Unique login name.
    pub username: Username,
    /// Argon2id PHC string.
    pub password_hash: String,
}

impl std::fmt::Debug for Admin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Admin")
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}
