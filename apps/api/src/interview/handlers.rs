//! Axum route handlers for the Interview API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extractors::AppJson;
use crate::interview::extract::QuestionSet;
use crate::interview::follow_up::{generate_follow_up, ConversationTurn};
use crate::interview::questions::generate_questions;
use crate::interview::report::generate_report;
use crate::resume::{extract_resume_text, is_allowed_file};
use crate::state::AppState;

/// Multipart field carrying the uploaded resume.
const RESUME_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub questions: QuestionSet,
}

#[derive(Debug, Deserialize)]
pub struct FollowUpRequest {
    pub history: Option<Vec<ConversationTurn>>,
}

#[derive(Debug, Serialize)]
pub struct FollowUpResponse {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub answers: Option<Vec<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Accepts a multipart PDF upload in the `resume` field, extracts its text and
/// returns generated interview questions.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let upload_id = Uuid::new_v4();
    let limit = state.config.max_upload_bytes;

    async move {
        let mut upload = None;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| upload_error(e, limit))?
        {
            if field.name() != Some(RESUME_FIELD) {
                continue;
            }
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| upload_error(e, limit))?;
            upload = Some((filename, data));
            break;
        }

        let (filename, data) =
            upload.ok_or_else(|| AppError::Validation("No resume file part".to_string()))?;

        if filename.is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }
        if !is_allowed_file(&filename) {
            return Err(AppError::Validation(
                "Invalid file type. Please upload a PDF.".to_string(),
            ));
        }

        info!(filename = %filename, bytes = data.len(), "Resume received");

        let resume_text = extract_resume_text(data).await?;
        let questions = generate_questions(state.llm.as_ref(), &resume_text).await?;

        info!(count = questions.len(), "Interview questions generated");
        Ok(Json(AnalyzeResponse { questions }))
    }
    .instrument(info_span!("analyze", %upload_id))
    .await
}

/// POST /api/follow-up
///
/// Returns the next follow-up question, or `[NEXT_QUESTION]` when the topic is done.
pub async fn handle_follow_up(
    State(state): State<AppState>,
    AppJson(request): AppJson<FollowUpRequest>,
) -> Result<Json<FollowUpResponse>, AppError> {
    let history = request
        .history
        .ok_or_else(|| AppError::Validation("Missing history".to_string()))?;

    let follow_up = generate_follow_up(state.llm.as_ref(), &history).await;

    Ok(Json(FollowUpResponse {
        question: follow_up.into_text(),
    }))
}

/// POST /api/evaluate
///
/// Returns the final report, or `{}` when no answers were given.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    AppJson(request): AppJson<EvaluateRequest>,
) -> Result<Json<Value>, AppError> {
    let answers = request
        .answers
        .ok_or_else(|| AppError::Validation("Missing answers".to_string()))?;

    let body = match generate_report(state.llm.as_ref(), &answers).await? {
        Some(report) => serde_json::to_value(report).map_err(anyhow::Error::from)?,
        None => Value::Object(Default::default()),
    };

    Ok(Json(body))
}

/// Oversized uploads surface as 413; any other multipart failure is the client's malformed body.
fn upload_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload exceeds the limit of {limit} bytes"))
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}
