use crate::flash::{self, Flash};
use crate::views::{views, Message};
use crate::{error::AppError, AppState};
use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use core_types::StudentForm;
use minijinja::context;
use registry::RegistryError;
use std::sync::Arc;

/// # GET /
/// Lists every student and drains any pending flash message.
pub async fn index(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let students = state.registry.list().await?;
    let (jar, message) = flash::take(jar);
    let page = views().render("index.html", context! { students => students, message => message })?;
    Ok((jar, Html(page)))
}

/// # GET /register
pub async fn register_form() -> Result<Html<String>, AppError> {
    let page = views().render("register.html", context! { form => StudentForm::default() })?;
    Ok(Html(page))
}

/// # POST /register
/// Creates the student and redirects to the list, or re-displays the form
/// with the submitted values and the reason it was rejected.
pub async fn register_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    form: Result<Form<StudentForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = submitted_form(form)?;
    match state.registry.register(&form).await {
        Ok(_) => Ok(redirect_home(jar, Flash::Registered)),
        Err(err) => {
            let status = rejection_status(&err);
            let message = Message::new(err.user_message(), err.severity());
            let page = views().render("register.html", context! { form => form, message => message })?;
            Ok((status, Html(page)).into_response())
        }
    }
}

/// # GET /view/:id
pub async fn view_student(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let id = student_id(path)?;
    let student = state.registry.view(id).await?;
    let page = views().render("view.html", context! { student => student })?;
    Ok(Html(page))
}

/// # GET /update/:id
/// Shows the edit form pre-filled with the stored values.
pub async fn update_form(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, AppError> {
    let id = student_id(path)?;
    let student = state.registry.view(id).await?;
    let form = StudentForm::from(&student);
    let page = views().render("update.html", context! { student_id => id, form => form })?;
    Ok(Html(page))
}

/// # POST /update/:id
pub async fn update_submit(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    jar: CookieJar,
    form: Result<Form<StudentForm>, FormRejection>,
) -> Result<Response, AppError> {
    let id = student_id(path)?;
    let form = submitted_form(form)?;
    match state.registry.update(id, &form).await {
        Ok(_) => Ok(redirect_home(jar, Flash::Updated)),
        Err(RegistryError::NotFound) => Err(RegistryError::NotFound.into()),
        Err(err) => {
            let status = rejection_status(&err);
            let message = Message::new(err.user_message(), err.severity());
            let page = views().render(
                "update.html",
                context! { student_id => id, form => form, message => message },
            )?;
            Ok((status, Html(page)).into_response())
        }
    }
}

/// # GET /delete/:id
/// Deletes the student and returns to the list with the outcome.
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let id = student_id(path)?;
    match state.registry.delete(id).await {
        Ok(_) => Ok(redirect_home(jar, Flash::Deleted)),
        Err(RegistryError::NotFound) => Err(RegistryError::NotFound.into()),
        Err(_) => Ok(redirect_home(jar, Flash::DeleteFailed)),
    }
}

/// Fallback for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound("Page not found.".to_string())
}

/// Ids that are not integers name no student.
fn student_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::NotFound(RegistryError::NotFound.user_message()))
}

/// A body that cannot be read as a form is answered with an error page
/// carrying the extractor's own status (415, 413, 400, ...).
fn submitted_form(form: Result<Form<StudentForm>, FormRejection>) -> Result<StudentForm, AppError> {
    form.map(|Form(form)| form).map_err(|rejection| AppError::Rejected {
        status: rejection.status(),
        detail: rejection.body_text(),
    })
}

fn rejection_status(err: &RegistryError) -> StatusCode {
    if err.is_validation() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn redirect_home(jar: CookieJar, message: Flash) -> Response {
    (flash::push(jar, message), Redirect::to("/")).into_response()
}
