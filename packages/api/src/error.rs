// ABOUTME: Application error type returned by every HTTP handler
// ABOUTME: Maps domain and upstream failures to status codes with sanitized, request-tagged bodies

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lendflow_deals::IngestError;
use lendflow_store::StoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Main application error type that all handlers should return
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Resource not found")]
    NotFound,

    /// Non-2xx answer from the lending API, passed through
    #[error("Upstream error {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Structured error response format for API consistency
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
    request_id: String,
}

/// Error detail structure with machine-readable codes
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl AppError {
    /// Convert AppError to appropriate HTTP status code and error code
    fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Upstream { status, .. } => (*status, "UPSTREAM_ERROR"),
            AppError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            AppError::Configuration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Get user-friendly error message (sanitized for external consumption)
    fn to_user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => format!("Validation failed: {}", msg),
            AppError::Unauthorized => "Authentication required".to_string(),
            AppError::Forbidden { message } => message.clone(),
            AppError::NotFound => "The requested deal was not found".to_string(),
            AppError::Upstream { message, .. } => message.clone(),
            AppError::ServiceUnavailable(_) => {
                "The lending service is temporarily unavailable".to_string()
            }
            AppError::Configuration(_) => "Server configuration error".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();
        let user_message = self.to_user_message();

        // Log internal errors with full context but don't expose details
        match &self {
            AppError::Internal(err) => {
                error!(
                    request_id = %request_id,
                    error = %err,
                    "Internal server error occurred"
                );
            }
            AppError::Configuration(msg) => {
                error!(
                    request_id = %request_id,
                    config_error = %msg,
                    "Configuration error"
                );
            }
            AppError::ServiceUnavailable(msg) => {
                warn!(
                    request_id = %request_id,
                    upstream_error = %msg,
                    "Lending API unreachable"
                );
            }
            _ => {
                info!(
                    request_id = %request_id,
                    error_code = %error_code,
                    error = %self,
                    "API error response"
                );
            }
        }

        error_response(status_code, error_code, user_message, request_id)
    }
}

/// Render the shared `{success, error, request_id}` envelope
pub(crate) fn error_response(
    status: StatusCode,
    code: &str,
    message: String,
    request_id: String,
) -> Response {
    let body = ErrorResponse {
        success: false,
        error: ErrorDetail {
            code: code.to_string(),
            message,
        },
        request_id,
    };

    (status, Json(body)).into_response()
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::EmptyContent => AppError::validation(err.to_string()),
            IngestError::MissingCredential => AppError::Unauthorized,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unauthorized(_) => AppError::Unauthorized,
            StoreError::Forbidden(message) => AppError::Forbidden { message },
            StoreError::NotFound(_) => AppError::NotFound,
            StoreError::Http { status, message } => AppError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            },
            StoreError::Timeout => AppError::ServiceUnavailable("request timed out".to_string()),
            StoreError::Network(msg) => AppError::ServiceUnavailable(msg),
            StoreError::Configuration(msg) => AppError::Configuration(msg),
            StoreError::InvalidResponse(msg) => {
                AppError::internal(anyhow::anyhow!("Invalid lending API response: {}", msg))
            }
        }
    }
}
