use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

/// Domain errors surfaced by the auth and user services.
///
/// Every variant maps to exactly one HTTP status at the boundary; nothing
/// below the handlers touches `StatusCode` directly.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or empty.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness invariant was violated, either caught before the insert
    /// or reported by the database on the insert itself.
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials or missing token. The message is deliberately generic
    /// and never reveals which factor failed.
    #[error("{0}")]
    Auth(String),

    /// Unexpected fault. Logged server-side; the caller only sees a generic
    /// message.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        // Unique violations are the authoritative guard against registration
        // races; everything else is an unexpected fault.
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return ApiError::conflict("user already exists");
            }
        }
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}
