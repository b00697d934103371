use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::classify::classify_text;
use crate::errors::AppError;
use crate::render::{render, DocumentFormat};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DownloadRequest {
    pub text: String,
}

/// POST /api/v1/download/:format
/// Renders the posted text as it stands; callers send the rewritten text they accepted.
/// The format is checked before the body is parsed.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(format): Path<String>,
    body: Bytes,
) -> Result<Response, AppError> {
    let format: DocumentFormat = format.parse()?;
    let req: DownloadRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Invalid download request: {e}")))?;

    if req.text.trim().is_empty() {
        return Err(AppError::Validation("No text provided".to_string()));
    }
    if req.text.len() > state.config.max_text_bytes {
        return Err(AppError::OversizeInput {
            limit: state.config.max_text_bytes,
        });
    }

    let document = tokio::task::spawn_blocking(move || {
        let classified = classify_text(&req.text);
        render(&classified, format)
    })
    .await
    .map_err(|e| anyhow::anyhow!("Render task failed: {e}"))??;

    info!(
        "Rendered {} ({} bytes, {} lines)",
        document.filename,
        document.bytes.len(),
        document.roles.len()
    );

    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    Ok((
        [
            (header::CONTENT_TYPE, document.format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}
