//! Authentication route handlers.
//!
//! Username/password login against the `admin` table. A failed attempt
//! re-renders the form with a flash message and leaves the session untouched.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::flash::{self, FlashMessage};
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Message shown for every rejected login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
///
/// `Debug` is implemented manually so the password never ends up in logs.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub username: String,
    pub flashes: Vec<FlashMessage>,
}

// =============================================================================
// Routes
// =============================================================================

/// Display the login page.
#[instrument(skip(session))]
pub async fn login_page(session: Session) -> impl IntoResponse {
    LoginTemplate {
        username: String::new(),
        flashes: flash::take(&session).await,
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.username, &form.password).await {
        Ok(admin) => {
            set_current_admin(&session, &admin).await?;
            set_sentry_user(admin.username.as_str());
            flash::push(&session, FlashMessage::success("Login successful")).await?;

            tracing::info!(username = %admin.username, "Admin logged in");
            Ok(Redirect::to("/").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Failed login attempt");

            let mut flashes = flash::take(&session).await;
            flashes.push(FlashMessage::error(INVALID_CREDENTIALS_MESSAGE));

            Ok(LoginTemplate {
                username: form.username,
                flashes,
            }
            .into_response())
        }
        Err(AuthError::Repository(e)) => Err(e.into()),
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}

/// Log out: drop the whole session and return to the login page.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_current_admin(&session).await?;
    clear_sentry_user();
    flash::push(&session, FlashMessage::success("You have been logged out")).await?;

    tracing::info!("Admin logged out");
    Ok(Redirect::to("/login"))
}
