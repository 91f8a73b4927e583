//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Verify credentials (rate limited)
//! GET  /logout                 - Logout
//!
//! # Students (login required)
//! GET  /                       - Student list + add form
//! POST /add                    - Add student
//! GET  /delete/{id}            - Delete student
//! POST /delete/{id}            - Delete student (form button)
//! GET  /edit/{id}              - Edit form
//! POST /edit/{id}              - Save edit
//! ```

pub mod auth;
pub mod students;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{create_session_layer, login_rate_limiter, security_headers_middleware};
use crate::state::AppState;

/// Directory static assets are served from, relative to the working directory.
const STATIC_DIR: &str = "crates/admin/static";

/// Build the page routes (without state or middleware).
///
/// `trust_proxy_headers` selects how the login rate limiter identifies clients.
pub fn routes(trust_proxy_headers: bool) -> Router<AppState> {
    Router::new()
        // Auth
        .route(
            "/login",
            get(auth::login_page)
                .merge(post(auth::login).layer(login_rate_limiter(trust_proxy_headers))),
        )
        .route("/logout", get(auth::logout))
        // Students
        .route("/", get(students::index))
        .route("/add", post(students::add))
        .route(
            "/delete/{id}",
            get(students::delete).post(students::delete),
        )
        .route(
            "/edit/{id}",
            get(students::edit_page).post(students::edit),
        )
}

/// Build the complete application: routes, health checks, static files and
/// the middleware stack.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.pool(), state.config());
    let trust_proxy_headers = state.config().trust_proxy_headers;

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes(trust_proxy_headers))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
