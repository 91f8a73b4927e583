//! Student CRUD route handlers.
//!
//! Every handler takes [`RequireAdminAuth`] as its first extractor, so an
//! anonymous request is redirected before any path, form or store access.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use student_records_core::StudentId;

use crate::db::{RepositoryError, StudentRepository};
use crate::error::AppError;
use crate::filters;
use crate::flash::{self, FlashMessage};
use crate::middleware::RequireAdminAuth;
use crate::models::student::{Student, StudentForm, StudentInput};
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Student list page template.
#[derive(Template, WebTemplate)]
#[template(path = "students/index.html")]
pub struct IndexTemplate {
    pub username: String,
    pub students: Vec<Student>,
    pub flashes: Vec<FlashMessage>,
}

/// Edit student page template.
#[derive(Template, WebTemplate)]
#[template(path = "students/edit.html")]
pub struct EditTemplate {
    pub username: String,
    pub student_id: StudentId,
    pub form: StudentForm,
    pub error: Option<String>,
    pub flashes: Vec<FlashMessage>,
}

fn not_found(id: StudentId) -> AppError {
    AppError::NotFound(format!("student {id}"))
}

// =============================================================================
// Routes
// =============================================================================

/// List all students.
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<IndexTemplate, AppError> {
    let students = StudentRepository::new(state.pool()).list_all().await?;

    Ok(IndexTemplate {
        username: admin.username.into_inner(),
        students,
        flashes: flash::take(&session).await,
    })
}

/// Add a student from the list page form.
#[instrument(skip(_admin, state, session, form))]
pub async fn add(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<StudentForm>,
) -> Result<Redirect, AppError> {
    match StudentInput::try_from(&form) {
        Ok(input) => {
            let student = StudentRepository::new(state.pool()).create(&input).await?;
            tracing::info!(student_id = %student.id, "Student added");
            flash::push(&session, FlashMessage::success("Student added")).await?;
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected student input");
            flash::push(&session, FlashMessage::error(format!("Could not add student: {e}")))
                .await?;
        }
    }

    Ok(Redirect::to("/"))
}

/// Delete a student. Served for both GET and POST.
#[instrument(skip(_admin, state, session))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<StudentId>,
) -> Result<Redirect, AppError> {
    if StudentRepository::new(state.pool()).delete(id).await? {
        tracing::info!(student_id = %id, "Student deleted");
        flash::push(&session, FlashMessage::success("Student deleted")).await?;
    } else {
        flash::push(&session, FlashMessage::error("Student not found")).await?;
    }

    Ok(Redirect::to("/"))
}

/// Display the edit form for one student.
#[instrument(skip(admin, state, session))]
pub async fn edit_page(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<StudentId>,
) -> Result<EditTemplate, AppError> {
    let student = StudentRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(EditTemplate {
        username: admin.username.into_inner(),
        student_id: id,
        form: StudentForm::from(&student),
        error: None,
        flashes: flash::take(&session).await,
    })
}

/// Save the edit form.
///
/// Invalid input re-renders the form with the submitted values and the
/// validation message; nothing is written.
#[instrument(skip(admin, state, session, form))]
pub async fn edit(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<StudentId>,
    Form(form): Form<StudentForm>,
) -> Result<Response, AppError> {
    let repo = StudentRepository::new(state.pool());

    if repo.get_by_id(id).await?.is_none() {
        return Err(not_found(id));
    }

    let input = match StudentInput::try_from(&form) {
        Ok(input) => input,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected student input");
            return Ok(EditTemplate {
                username: admin.username.into_inner(),
                student_id: id,
                form,
                error: Some(e.to_string()),
                flashes: flash::take(&session).await,
            }
            .into_response());
        }
    };

    if let Err(e) = repo.update(id, &input).await {
        return Err(match e {
            RepositoryError::NotFound => not_found(id),
            other => other.into(),
        });
    }

    tracing::info!(student_id = %id, "Student updated");
    flash::push(&session, FlashMessage::success("Student updated")).await?;
    Ok(Redirect::to("/").into_response())
}
