//! Final interview report from the candidate's answers.

use tracing::error;

use crate::errors::AppError;
use crate::interview::extract::{extract_report, Report};
use crate::interview::prompts::REPORT_PROMPT_TEMPLATE;
use crate::llm_client::prompts::FENCED_JSON_INSTRUCTION;
use crate::llm_client::TextGenerator;

/// Renders answers as a bulleted list.
pub fn format_answers(answers: &[String]) -> String {
    answers
        .iter()
        .map(|answer| format!("- {answer}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns `None` without calling the model when there is nothing to evaluate.
pub async fn generate_report(
    llm: &dyn TextGenerator,
    answers: &[String],
) -> Result<Option<Report>, AppError> {
    if answers.is_empty() {
        return Ok(None);
    }

    let prompt = REPORT_PROMPT_TEMPLATE
        .replace("{format_instruction}", FENCED_JSON_INSTRUCTION)
        .replace("{answers}", &format_answers(answers));

    let reply = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Report generation failed: {e}")))?;

    extract_report(&reply).map(Some).map_err(|failure| {
        error!(%failure, "Error processing AI response for report. Response was:\n{reply}");
        AppError::InvalidAiFormat {
            what: "the report",
            failure,
        }
    })
}
