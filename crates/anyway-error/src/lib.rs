use axum::{http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Application error type surfaced at the HTTP edge
///
/// Errors from the production pipeline travel as `anyhow::Error` and are
/// only wrapped here, at the boundary, so the original value stays
/// reachable through [`AppError::source_error`].
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Input Errors =====
    #[error("Invalid request format: {0}")]
    InvalidRequest(String),

    // ===== Delivery Errors =====
    #[error("Error processing message: {0}")]
    Delivery(anyhow::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for programmatic error handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::Delivery(_) => "DELIVERY_ERROR",
        }
    }

    /// The pipeline error behind a delivery failure, untouched
    pub fn source_error(&self) -> Option<&anyhow::Error> {
        match self {
            AppError::Delivery(err) => Some(err),
            AppError::InvalidRequest(_) => None,
        }
    }

    /// Log this error with appropriate level and context
    pub fn log(&self) {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(
                error = %self,
                error_code = %code,
                status = %status.as_u16(),
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                error_code = %code,
                "Client error occurred"
            );
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.log();

        let status = self.status_code();
        let body = json!({ "error": self.to_string() });

        (status, axum::Json(body)).into_response()
    }
}

// ============================================================================
// Helper functions for creating common errors
// ============================================================================

impl AppError {
    /// Create an input error (400)
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        AppError::InvalidRequest(msg.into())
    }

    /// Wrap a delivery failure without altering it
    pub fn delivery(err: anyhow::Error) -> Self {
        AppError::Delivery(err)
    }
}
