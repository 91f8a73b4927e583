//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Argon2id password authentication and admin account management

pub mod auth;

pub use auth::{AuthError, AuthService};
