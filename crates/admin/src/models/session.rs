//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use student_records_core::Username;

/// Session-stored admin identity.
///
/// Its presence in the session is the logged-in flag checked by
/// [`crate::middleware::RequireAdminAuth`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's login name.
    pub username: Username,
    /// When this session was authenticated.
    pub logged_in_at: DateTime<Utc>,
}

impl CurrentAdmin {
    /// Create the session identity for a freshly authenticated admin.
    #[must_use]
    pub fn new(username: Username) -> Self {
        Self {
            username,
            logged_in_at: Utc::now(),
        }
    }
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for one-shot flash messages.
    pub const FLASH: &str = "flash";
}
