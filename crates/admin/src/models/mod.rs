//! Domain models for the admin panel.

pub mod admin;
pub mod session;
pub mod student;

pub use admin::Admin;
pub use session::{CurrentAdmin, keys as session_keys};
pub use student::{Student, StudentForm, StudentInput};
