//! Error handling for RetakeManager
//!
//! This module defines the main error type used throughout the application
//! and maps it onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::validation::ValidationErrors;

/// Main error type for RetakeManager
#[derive(Error, Debug)]
pub enum RetakeError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i32 },

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i32 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i32 },

    #[error("No retake of course {course_id} for user {user_id}")]
    RetakeNotFound { user_id: i32, course_id: i32 },

    #[error("Authentication required")]
    Unauthorized,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// PostgreSQL SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Result type alias for RetakeManager operations
pub type Result<T> = std::result::Result<T, RetakeError>;

impl From<ValidationErrors> for RetakeError {
    fn from(errors: ValidationErrors) -> Self {
        RetakeError::Validation(errors)
    }
}

impl RetakeError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        RetakeError::NotFound { entity, id }
    }

    /// A write lost a race against a concurrent insert of the same unique key
    pub fn is_unique_violation(&self) -> bool {
        match self {
            RetakeError::Database(sqlx::Error::Database(db_error)) => {
                db_error.code().as_deref() == Some(UNIQUE_VIOLATION)
            }
            _ => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        if self.is_unique_violation() {
            return ErrorSeverity::Info;
        }
        match self {
            RetakeError::Database(_) => ErrorSeverity::Critical,
            RetakeError::Migration(_) => ErrorSeverity::Critical,
            RetakeError::Config(_) => ErrorSeverity::Critical,
            RetakeError::Unauthorized => ErrorSeverity::Warning,
            RetakeError::PermissionDenied(_) => ErrorSeverity::Warning,
            RetakeError::Validation(_)
            | RetakeError::NotFound { .. }
            | RetakeError::UserNotFound { .. }
            | RetakeError::EventNotFound { .. }
            | RetakeError::RetakeNotFound { .. }
            | RetakeError::InvalidInput(_)
            | RetakeError::Conflict(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_unique_violation() {
            return StatusCode::CONFLICT;
        }
        match self {
            RetakeError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RetakeError::NotFound { .. }
            | RetakeError::UserNotFound { .. }
            | RetakeError::EventNotFound { .. }
            | RetakeError::RetakeNotFound { .. } => StatusCode::NOT_FOUND,
            RetakeError::Unauthorized => StatusCode::UNAUTHORIZED,
            RetakeError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            RetakeError::InvalidInput(_) | RetakeError::Serialization(_) => StatusCode::BAD_REQUEST,
            RetakeError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RetakeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let unique = self.is_unique_violation();

        match self.severity() {
            ErrorSeverity::Info => info!(error = %self, status = status.as_u16(), "Request rejected"),
            ErrorSeverity::Warning => warn!(error = %self, status = status.as_u16(), "Request denied"),
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                error!(error = %self, severity = %self.severity(), "Request failed")
            }
        }

        let body = match self {
            RetakeError::Validation(errors) => json!({
                "error": "validation_failed",
                "fields": errors.errors,
            }),
            _ if status.is_server_error() => json!({ "error": "internal_error" }),
            _ if unique => json!({ "error": "Conflict: record already exists" }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
