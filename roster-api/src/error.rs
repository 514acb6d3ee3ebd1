/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>`; every error body is a JSON
/// object with a `message` key.
///
/// # Example
///
/// ```
/// use roster_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::json;
///
/// async fn handler(id: i32) -> ApiResult<Json<serde_json::Value>> {
///     if id != 1 {
///         return Err(ApiError::user_not_found(id));
///     }
///     Ok(Json(json!({ "id": id })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_shared::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned for any malformed or incomplete request payload
pub const VALIDATION_FAILED_MESSAGE: &str = "Input payload validation failed";

/// Message returned when a registration or update hits an existing email
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Sorry. That email already exists.";

/// Message returned for internal errors; details only go to the log
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400), e.g. duplicate email
    BadRequest(String),

    /// Not found (404)
    NotFound(String),

    /// Payload failed parsing or field validation (400)
    ValidationFailed(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

impl ApiError {
    /// Duplicate-email rejection
    pub fn duplicate_email() -> Self {
        ApiError::BadRequest(DUPLICATE_EMAIL_MESSAGE.to_string())
    }

    /// Unknown user ID
    pub fn user_not_found(id: i32) -> Self {
        ApiError::NotFound(format!("User {} does not exist", id))
    }
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation (`body` when the payload itself is unreadable)
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,

    /// Per-field validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationFailed(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::ValidationFailed(errors) => (
                StatusCode::BAD_REQUEST,
                VALIDATION_FAILED_MESSAGE.to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorResponse { message, errors })).into_response()
    }
}

/// Convert storage errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::duplicate_email(),
            StoreError::Database(db_err) => {
                ApiError::InternalError(format!("Database error: {}", db_err))
            }
        }
    }
}
