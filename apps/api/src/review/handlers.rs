use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::{AnalysisResult, Category, HighlightedLine};
use crate::errors::AppError;
use crate::extract::Upload;
use crate::review::review_text;
use crate::rewrite::RewriteSuggestion;
use crate::state::AppState;
use crate::suggest::{augment, SuggestionRequest, SuggestionSource};

/// Multipart field carrying the résumé file.
pub const UPLOAD_FIELD: &str = "resume";

#[derive(Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct ReviewResponse {
    pub request_id: Uuid,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub lines: Vec<HighlightedLine>,
    pub rewritten: String,
    pub suggestions: Vec<RewriteSuggestion>,
    pub suggestion_source: SuggestionSource,
}

/// POST /api/v1/analyze
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ReviewResponse>, AppError> {
    let limit = state.config.max_upload_bytes;
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        upload = Some(Upload { filename, bytes });
        break;
    }

    let upload = upload.ok_or_else(|| {
        AppError::Validation(format!("Missing '{UPLOAD_FIELD}' file field"))
    })?;
    info!("Received upload {} ({} bytes)", upload.filename, upload.bytes.len());

    let text = state.extractor.extract(upload).await?;
    review_response(&state, text).await
}

/// POST /api/v1/analyze/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeTextRequest>,
) -> Result<Json<ReviewResponse>, AppError> {
    review_response(&state, req.text).await
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::OversizeInput { limit }
    } else {
        AppError::Validation(e.body_text())
    }
}

/// Shared tail of both analyze endpoints. Empty text is reviewed, not rejected.
async fn review_response(state: &AppState, text: String) -> Result<Json<ReviewResponse>, AppError> {
    if text.len() > state.config.max_text_bytes {
        return Err(AppError::OversizeInput {
            limit: state.config.max_text_bytes,
        });
    }

    let review = review_text(&text, &state.config.analysis);
    info!(
        score = review.analysis.score,
        lines = review.lines.len(),
        issues = review.analysis.findings_in(Category::Issue).count(),
        "Reviewed résumé"
    );

    let request = SuggestionRequest {
        text,
        result: review.analysis.clone(),
    };
    let augmented = augment(
        state.suggestions.as_deref(),
        request,
        &review.classified,
        review.suggestions,
        state.config.suggestion_timeout,
    )
    .await;

    Ok(Json(ReviewResponse {
        request_id: Uuid::new_v4(),
        analysis: review.analysis,
        lines: review.lines,
        rewritten: review.rewritten,
        suggestions: augmented.suggestions,
        suggestion_source: augmented.source,
    }))
}
