use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::evaluation::parser::MalformedCompletion;
use crate::extraction::ExtractError;
use crate::llm_client::LlmError;

pub const MISSING_RESUME_MESSAGE: &str = "Please upload a resume.";
pub const UNSUPPORTED_TYPE_MESSAGE: &str =
    "Unsupported file type. Please upload a PDF or DOCX file.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant maps to exactly one user-facing message class.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Input(String),

    #[error("Document could not be read: {0}")]
    DocumentCorrupt(String),

    #[error("Completion service error: {0}")]
    CompletionService(String),

    #[error("{0}")]
    MalformedCompletion(#[from] MalformedCompletion),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat(_) => AppError::Input(UNSUPPORTED_TYPE_MESSAGE.to_string()),
            ExtractError::DocumentCorrupt(msg) => AppError::DocumentCorrupt(msg),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::CompletionService(err.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(err.body_text());
        }
        AppError::Input(format!("Invalid upload: {}", err.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Input(msg) => {
                tracing::warn!("Rejected input: {msg}");
                (StatusCode::BAD_REQUEST, "INPUT_ERROR", msg.clone())
            }
            AppError::DocumentCorrupt(msg) => {
                tracing::warn!("Corrupt document: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "DOCUMENT_CORRUPT",
                    "The uploaded document could not be read. Please check the file and try again."
                        .to_string(),
                )
            }
            AppError::CompletionService(msg) => {
                tracing::error!("Completion service error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "COMPLETION_SERVICE_ERROR",
                    format!("The evaluation service is unavailable: {msg}"),
                )
            }
            AppError::MalformedCompletion(e) => {
                tracing::error!("Malformed completion: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_COMPLETION",
                    "The evaluation service returned an unexpected response. Please try again."
                        .to_string(),
                )
            }
            AppError::PayloadTooLarge(msg) => {
                tracing::warn!("Rejected oversized upload: {msg}");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "PAYLOAD_TOO_LARGE",
                    "The uploaded file is too large.".to_string(),
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
