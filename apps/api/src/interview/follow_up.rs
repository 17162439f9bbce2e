//! Conversational follow-up: history rendering and sentinel detection.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::interview::prompts::FOLLOW_UP_PROMPT_TEMPLATE;
use crate::llm_client::TextGenerator;

/// Exact reply the model gives when the current topic is exhausted.
pub const NEXT_QUESTION_MARKER: &str = "[NEXT_QUESTION]";

/// One turn of the interview conversation, in the shape the browser client sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: String,
    #[serde(default)]
    pub parts: Vec<TurnPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnPart {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// Ask this next.
    Question(String),
    /// Move on to the next prepared question.
    NextQuestion,
}

impl FollowUp {
    /// Wire form: the question text, or the sentinel marker.
    pub fn into_text(self) -> String {
        match self {
            FollowUp::Question(q) => q,
            FollowUp::NextQuestion => NEXT_QUESTION_MARKER.to_string(),
        }
    }
}

/// Interprets a model reply as either a follow-up question or the sentinel.
pub fn decide(reply: &str) -> FollowUp {
    let trimmed = reply.trim();
    if trimmed == NEXT_QUESTION_MARKER {
        FollowUp::NextQuestion
    } else {
        FollowUp::Question(trimmed.to_string())
    }
}

/// Renders history as `role: text` lines using each turn's first part.
pub fn format_history(history: &[ConversationTurn]) -> String {
    history
        .iter()
        .map(|turn| {
            let text = turn.parts.first().map(|p| p.text.as_str()).unwrap_or("");
            format!("{}: {}", turn.role, text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Asks the model for a follow-up. Upstream failures degrade to `NextQuestion`
/// so the interview can continue.
pub async fn generate_follow_up(
    llm: &dyn TextGenerator,
    history: &[ConversationTurn],
) -> FollowUp {
    let prompt = FOLLOW_UP_PROMPT_TEMPLATE
        .replace("{marker}", NEXT_QUESTION_MARKER)
        .replace("{history}", &format_history(history));

    match llm.generate(&prompt).await {
        Ok(reply) => decide(&reply),
        Err(e) => {
            warn!("Follow-up generation failed, skipping to next question: {e}");
            FollowUp::NextQuestion
        }
    }
}
