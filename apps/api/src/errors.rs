use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::extract::ExtractionFailure;
use crate::resume::ResumeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Resume error: {0}")]
    Resume(#[from] ResumeError),

    #[error("LLM error: {0}")]
    Llm(String),

    /// The model answered, but not in a shape the extractor accepts.
    /// `what` names the artifact for the user-facing message ("questions", "the report").
    #[error("Invalid AI format for {what}: {failure}")]
    InvalidAiFormat {
        what: &'static str,
        failure: ExtractionFailure,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::Resume(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "RESUME_UNREADABLE",
                format!("Failed to read PDF content: {e}"),
            ),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::InvalidAiFormat { what, failure } => {
                tracing::error!("Invalid AI format for {what}: {failure}");
                (
                    StatusCode::BAD_GATEWAY,
                    "INVALID_AI_FORMAT",
                    format!("The AI model returned an invalid format for {what}."),
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

/// Malformed or mistyped JSON bodies share the error envelope of every other 4xx.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
