//! Domain error types for the Prenoms server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::{HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use std::fmt;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Resource not found, or not visible to the caller
    #[error("{0} not found")]
    NotFound(String),

    /// A uniqueness constraint would be violated
    #[error("{message}")]
    AlreadyExists { field: &'static str, message: String },

    /// Row is still referenced by other rows and cannot be deleted
    #[error("{0} is still in use")]
    InUse(String),

    /// Request body, path or query could not be validated
    #[error("Invalid input: {message}")]
    Validation { loc: Vec<String>, message: String },

    /// Authentication failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    /// Shorthand for a duplicate on the given body field.
    pub fn already_exists(field: &'static str, message: impl Into<String>) -> Self {
        AppError::AlreadyExists {
            field,
            message: message.into(),
        }
    }

    /// Shorthand for a validation failure located at `loc`.
    pub fn validation(loc: &[&str], message: impl Into<String>) -> Self {
        AppError::Validation {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            message: message.into(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code, response_message, detail) = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "An internal database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
                None,
            ),
            AppError::AlreadyExists { field, message } => (
                actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                "ALREADY_EXISTS",
                message.clone(),
                Some(vec![ErrorDetail {
                    loc: vec!["body".to_string(), field.to_string()],
                    msg: message.clone(),
                    kind: "type_error.already_exists".to_string(),
                }]),
            ),
            AppError::InUse(what) => (
                actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                "IN_USE",
                self.to_string(),
                Some(vec![ErrorDetail {
                    loc: vec!["path".to_string(), what.to_lowercase()],
                    msg: self.to_string(),
                    kind: "type_error.in_use".to_string(),
                }]),
            ),
            AppError::Validation { loc, message } => (
                actix_web::http::StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                self.to_string(),
                Some(vec![ErrorDetail {
                    loc: loc.clone(),
                    msg: message.clone(),
                    kind: "value_error".to_string(),
                }]),
            ),
            AppError::Unauthorized(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                self.to_string(),
                None,
            ),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error_code.to_string(),
            message: response_message,
            detail,
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Field-level detail, present on 422 responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Vec<ErrorDetail>>,
}

/// One field-level problem: where it is, what is wrong, and its category.
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorDetail {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

/// True when the store rejected a write because of a unique constraint.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// True when the store rejected a write because of a foreign key.
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

// Conversion implementations for common error types

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}
