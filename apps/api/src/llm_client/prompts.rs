// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.

/// Appended to prompts whose reply goes through the response extractor.
/// The extractor looks for a ```json fenced block first.
pub const FENCED_JSON_INSTRUCTION: &str =
    "Wrap the JSON in a single fenced code block that starts with ```json and ends with ```.";
