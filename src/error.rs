//! Request-level error taxonomy.

use thiserror::Error;

use crate::store::StoreError;

/// Errors a request handler can return.
///
/// Each variant maps to one HTTP status and a fixed JSON shape (see
/// `http::response`).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing entity by slug, id or composite key → 404 `{message}`.
    #[error("{0}")]
    NotFound(String),

    /// Missing or malformed request input → 400 `{message}`.
    #[error("{0}")]
    BadRequest(String),

    /// Body larger than `security.max_body_size` → 413 `{message}`.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Missing or wrong admin credentials → 401 `{message}`.
    #[error("Unauthorized")]
    Unauthorized,

    /// Anything the store raised → 500 `{message, error}`.
    #[error("Internal server error")]
    Internal(#[from] StoreError),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::PayloadTooLarge => "payload_too_large",
            ApiError::Unauthorized => "unauthorized",
            ApiError::Internal(_) => "internal",
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
