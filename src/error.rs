// HTTP API Error Types
use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::store::StoreError;

/// Every way a request can fail, mapped onto the status codes clients
/// already rely on.
///
/// Authorization and store failures both answer 400, not 401/403/409,
/// because existing clients only distinguish 200, 400 and 404.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    EmptyBody,
    BodyRead(String),
    MalformedJson(String),
    EnvelopeTooShort { required: usize, actual: usize },
    Unauthorized(String),
    StoreOperationFailed(String),
    InvalidId(String),

    // 404 Not Found
    NotFound(String),
    RouteUnmatched(String),

    // 404 by default, 405 when strict
    MethodMismatch { strict: bool },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyBody
            | ApiError::BodyRead(_)
            | ApiError::MalformedJson(_)
            | ApiError::EnvelopeTooShort { .. }
            | ApiError::Unauthorized(_)
            | ApiError::StoreOperationFailed(_)
            | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::RouteUnmatched(_) => StatusCode::NOT_FOUND,
            ApiError::MethodMismatch { strict: true } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::MethodMismatch { strict: false } => StatusCode::NOT_FOUND,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            ApiError::EmptyBody => "No input!".to_string(),
            ApiError::BodyRead(msg) => format!("Failed to read request body: {}", msg),
            ApiError::MalformedJson(msg) => format!("Malformed JSON: {}", msg),
            ApiError::EnvelopeTooShort { required, actual } => format!(
                "Expected at least {} users in request, got {}",
                required, actual
            ),
            ApiError::Unauthorized(msg)
            | ApiError::StoreOperationFailed(msg)
            | ApiError::InvalidId(msg)
            | ApiError::NotFound(msg) => msg.clone(),
            ApiError::RouteUnmatched(path) => {
                format!("{} is not supported. Thanks for visiting!", path)
            }
            ApiError::MethodMismatch { .. } => "Method not allowed!".to_string(),
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::EmptyBody => "EMPTY_BODY",
            ApiError::BodyRead(_) => "BODY_READ",
            ApiError::MalformedJson(_) => "MALFORMED_JSON",
            ApiError::EnvelopeTooShort { .. } => "ENVELOPE_TOO_SHORT",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::StoreOperationFailed(_) => "STORE_OPERATION_FAILED",
            ApiError::InvalidId(_) => "INVALID_ID",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::RouteUnmatched(_) => "ROUTE_UNMATCHED",
            ApiError::MethodMismatch { .. } => "METHOD_MISMATCH",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }

    /// Routing fallbacks answer in plain text rather than JSON.
    fn is_plain_text(&self) -> bool {
        matches!(self, ApiError::RouteUnmatched(_) | ApiError::MethodMismatch { .. })
    }
}

impl ApiError {
    pub fn body_read(message: impl Into<String>) -> Self {
        ApiError::BodyRead(message.into())
    }

    pub fn malformed_json(message: impl Into<String>) -> Self {
        ApiError::MalformedJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn store_failed(message: impl Into<String>) -> Self {
        ApiError::StoreOperationFailed(message.into())
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        ApiError::InvalidId(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::warn!("Store operation failed: {}", err);
        ApiError::store_failed(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if self.is_plain_text() {
            return (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("{}\n", self.message()),
            )
                .into_response();
        }
        (status, Json(self.to_json())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
