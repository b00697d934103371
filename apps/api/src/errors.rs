use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractionError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Extraction failed: {0}")]
    ExtractionFailure(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Input exceeds the {limit} byte limit")]
    OversizeInput { limit: usize },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Render error: {0}")]
    Render(RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::TooLarge { limit, .. } => AppError::OversizeInput { limit },
            ExtractionError::UnsupportedExtension(ext) => AppError::UnsupportedFormat(ext),
            ExtractionError::Empty | ExtractionError::UnsafeFilename(_) => {
                AppError::Validation(e.to_string())
            }
            ExtractionError::Corrupt(_) | ExtractionError::Io(_) | ExtractionError::Task(_) => {
                AppError::ExtractionFailure(e.to_string())
            }
        }
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::UnsupportedFormat(format) => AppError::UnsupportedFormat(format),
            other => AppError::Render(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::ExtractionFailure(msg) => {
                tracing::warn!("Extraction failed: {msg}");
                (StatusCode::BAD_REQUEST, "EXTRACTION_FAILED", msg.clone())
            }
            AppError::UnsupportedFormat(format) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORMAT",
                format!("Unsupported format '{format}'; expected pdf, docx or txt"),
            ),
            AppError::OversizeInput { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "OVERSIZE_INPUT",
                self.to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "The document could not be rendered".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
