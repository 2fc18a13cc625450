use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::render_pdf;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub text: String,
}

/// POST /api/v1/export
///
/// Renders the optimized resume text into a downloadable PDF.
pub async fn handle_export(
    State(_state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::MissingField("text".to_string()));
    }

    let bytes = tokio::task::spawn_blocking(move || render_pdf(&req.text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("render task failed: {e}")))?
        .map_err(AppError::Internal)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"Optimized_Resume.pdf\"",
            ),
        ],
        bytes,
    ))
}
