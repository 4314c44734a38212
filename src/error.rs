/// Unified error types for the photo catalog
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum PhotoError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request payload failed validation
    #[error("Validation error")]
    Validation(Vec<FieldError>),

    /// Not found errors
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One entry of a 422 response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Location of the offending input, e.g. `["body", "name"]`
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn body(field: Option<&str>, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        let mut loc = vec!["body".to_string()];
        loc.extend(field.map(String::from));
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    pub fn path(field: &str, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: vec!["path".to_string(), field.to_string()],
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

/// Error body for everything except validation failures
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

/// Error body for validation failures
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub detail: Vec<FieldError>,
}

impl IntoResponse for PhotoError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            PhotoError::Validation(errors) => {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ValidationResponse { detail: errors }),
                )
                    .into_response();
            }
            PhotoError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            PhotoError::Database(_)
            | PhotoError::Config(_)
            | PhotoError::Internal(_)
            | PhotoError::Io(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(), // Don't leak details
                )
            }
        };

        (status, Json(DetailResponse { detail })).into_response()
    }
}

/// Result type alias for service operations
pub type PhotoResult<T> = Result<T, PhotoError>;
