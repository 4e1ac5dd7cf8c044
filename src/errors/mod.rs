//! Error handling module for the team roster backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response bodies.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_ROLE: &str = "INVALID_ROLE";
    pub const DUPLICATE_PHONE: &str = "DUPLICATE_PHONE";
    pub const DUPLICATE_EMAIL: &str = "DUPLICATE_EMAIL";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

pub const MEMBER_NOT_FOUND: &str = "Team member not found";

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Unknown team member id
    NotFound(String),
    /// Missing or malformed field
    Validation(String),
    /// Role outside the closed set of roles
    InvalidRole(String),
    /// Another record already uses this phone number
    DuplicatePhone,
    /// Another record already uses this email address
    DuplicateEmail,
    /// Database or file I/O failure
    Storage(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    pub fn member_not_found() -> Self {
        AppError::NotFound(MEMBER_NOT_FOUND.to_string())
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidRole(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DuplicatePhone => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::InvalidRole(_) => codes::INVALID_ROLE,
            AppError::DuplicatePhone => codes::DUPLICATE_PHONE,
            AppError::DuplicateEmail => codes::DUPLICATE_EMAIL,
            AppError::Storage(_) => codes::STORAGE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidRole(role) => {
                format!("Invalid role '{}': expected 'regular' or 'admin'", role)
            }
            AppError::DuplicatePhone => "Phone number already registered".to_string(),
            AppError::DuplicateEmail => "Email already registered".to_string(),
            AppError::Storage(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // The validator runs first, so a constraint hit here means a concurrent writer won.
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                let message = db_err.message();
                if message.contains("team_members.phone") {
                    return AppError::DuplicatePhone;
                }
                if message.contains("team_members.email") {
                    return AppError::DuplicateEmail;
                }
            }
        }
        tracing::error!("Database error: {:?}", err);
        AppError::Storage(format!("Database error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Storage I/O error: {:?}", err);
        AppError::Storage(format!("Storage I/O error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Storage(format!("JSON error: {}", err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            detail: error.message(),
            code: error.error_code().to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::member_not_found().status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::DuplicatePhone.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::DuplicateEmail.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidRole("owner".to_string()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Validation("first_name is required".to_string()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Storage("disk full".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_body() {
        let body = ErrorResponse::new(&AppError::DuplicateEmail);
        assert_eq!(body.code, "DUPLICATE_EMAIL");
        assert_eq!(body.detail, "Email already registered");

        let body = ErrorResponse::new(&AppError::member_not_found());
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.detail, "Team member not found");
    }
}
