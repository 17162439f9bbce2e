// Interview flow: resume questions, conversational follow-ups, final report.
// All model calls go through llm_client::TextGenerator; all reply parsing goes through extract.

pub mod extract;
pub mod follow_up;
pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod report;
