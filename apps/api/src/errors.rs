use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::decoder::DecodeError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A required workflow input (job description or resume text) is blank.
    /// The workflow stays in place; nothing is submitted.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// The uploaded file is neither a PDF nor a DOCX document.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The document decoded cleanly but contained no extractable text
    /// (e.g. an image-only scan).
    #[error("No readable text found in the document")]
    EmptyExtraction,

    /// Corrupt stream or malformed archive inside a supported format.
    #[error("Failed to read the document: {0}")]
    DecodeFailed(String),

    /// The analysis service answered, but the payload did not match the
    /// expected result shape.
    #[error("Analysis service returned an invalid response: {0}")]
    InvalidResponseShape(String),

    /// Network failure, non-success status, or timeout from the analysis
    /// or chat service.
    #[error("Analysis service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                "MISSING_FIELD",
                format!("Both fields are required for a precise scan ({field} is empty)"),
            ),
            AppError::UnsupportedFormat(detected) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                format!("Unsupported file format ({detected}). Please upload a PDF or DOCX file."),
            ),
            AppError::EmptyExtraction => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_EXTRACTION",
                "Could not extract any text from the file. It might be scanned or empty."
                    .to_string(),
            ),
            AppError::DecodeFailed(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DECODE_ERROR",
                format!("Failed to read the file: {msg}"),
            ),
            AppError::InvalidResponseShape(msg) => {
                tracing::error!("Invalid analysis response: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "INVALID_RESPONSE_SHAPE",
                    "The analysis service returned an unexpected result. Please try again."
                        .to_string(),
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Analysis service failure: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Failed to analyze resume. Please try again.".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
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

impl From<DecodeError> for AppError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnsupportedFormat(detected) => AppError::UnsupportedFormat(detected),
            DecodeError::EmptyExtraction => AppError::EmptyExtraction,
            DecodeError::Malformed(msg) => AppError::DecodeFailed(msg),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Shape(msg) => AppError::InvalidResponseShape(msg),
            LlmError::EmptyContent => {
                AppError::InvalidResponseShape("service returned empty content".to_string())
            }
            other => AppError::ServiceUnavailable(other.to_string()),
        }
    }
}
