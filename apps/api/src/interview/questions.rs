//! Interview question generation from resume text.

use tracing::{error, warn};

use crate::errors::AppError;
use crate::interview::extract::{extract_list, QuestionSet};
use crate::interview::prompts::QUESTIONS_PROMPT_TEMPLATE;
use crate::llm_client::prompts::FENCED_JSON_INSTRUCTION;
use crate::llm_client::TextGenerator;

/// Number of questions the prompt asks for. Other counts are logged, not rejected.
pub const EXPECTED_QUESTION_COUNT: usize = 5;

pub async fn generate_questions(
    llm: &dyn TextGenerator,
    resume_text: &str,
) -> Result<QuestionSet, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("No resume text provided.".to_string()));
    }

    let prompt = QUESTIONS_PROMPT_TEMPLATE
        .replace("{format_instruction}", FENCED_JSON_INSTRUCTION)
        .replace("{resume_text}", resume_text);

    let reply = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;

    let questions = extract_list(&reply).map_err(|failure| {
        error!(%failure, "Error processing AI response for questions. Response was:\n{reply}");
        AppError::InvalidAiFormat {
            what: "questions",
            failure,
        }
    })?;

    if questions.len() != EXPECTED_QUESTION_COUNT {
        warn!(
            "Expected {EXPECTED_QUESTION_COUNT} questions, model returned {}",
            questions.len()
        );
    }

    Ok(questions)
}
