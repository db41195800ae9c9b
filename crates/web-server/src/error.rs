use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::context;
use registry::RegistryError;
use thiserror::Error;

use crate::views::views;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Registry error: {0}")]
    Registry(RegistryError),
    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Rejected request ({status}): {detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound => AppError::NotFound(RegistryError::NotFound.user_message()),
            other => AppError::Registry(other),
        }
    }
}

/// Converts our custom `AppError` into an HTML error page.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Registry(registry_err) => {
                tracing::error!(error = ?registry_err, "Registry error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred. Please try again.".to_string(),
                )
            }
            AppError::Render(render_err) => {
                tracing::error!(error = ?render_err, "Template error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The page could not be rendered.".to_string(),
                )
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Rejected { status, detail } => {
                tracing::warn!(%status, %detail, "Rejected form submission.");
                (status, "The submitted form could not be read.".to_string())
            }
        };

        error_page(status, &detail)
    }
}

fn error_page(status: StatusCode, detail: &str) -> Response {
    let page = views().render(
        "error.html",
        context! { status => status.to_string(), detail => detail },
    );
    match page {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(error = ?err, "Error page could not be rendered.");
            (status, detail.to_string()).into_response()
        }
    }
}
