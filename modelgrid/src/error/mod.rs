//! Error types and HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type AdminResult<T> = Result<T, AdminError>;

/// Admin layer error type
#[derive(Debug, Error)]
pub enum AdminError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Malformed request payload
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing record, model, field or format renderer (404)
    #[error("not found: {0}")]
    NotFound(String),

    /// Update submitted without any data
    #[error("empty submission")]
    EmptySubmission,

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Template rendering error
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// Any other server-side failure
    #[error("server error: {0}")]
    ServerError(String),
}

impl AdminError {
    /// Shorthand for a [`AdminError::NotFound`] with a description of
    /// what was missing.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Config(_)
            | Self::EmptySubmission
            | Self::Database(_)
            | Self::Template(_)
            | Self::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "admin request failed");
        }
        (status, self.to_string()).into_response()
    }
}
