//! HTTP middleware for the admin panel.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers
//! 4. Session layer (tower-sessions with `SQLite` store)
//! 5. Login rate limiter (`POST /login` only)
//!
//! The auth check is an extractor ([`RequireAdminAuth`]) rather than a layer,
//! so every protected handler states its requirement in its signature.

pub mod auth;
pub mod rate_limit;
pub mod security_headers;
pub mod session;

pub use auth::{RequireAdminAuth, clear_current_admin, set_current_admin};
pub use rate_limit::login_rate_limiter;
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
