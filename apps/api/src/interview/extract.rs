//! Response extraction — recovers structured data from free-form model replies.
//!
//! Liberal in what it accepts (fenced ```json blocks, plus a bare `[...]`
//! fallback for lists), strict in what it returns (full JSON validity and
//! explicit key presence). Pure and synchronous: no logging, no I/O. Callers
//! log the failure kind together with the raw reply.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Keys a report object must carry, in the order they are reported when missing.
pub const REPORT_KEYS: [&str; 4] = ["overallScore", "strengths", "weaknesses", "suggestion"];

/// Ordered interview questions. Five are requested but the count is not enforced here.
pub type QuestionSet = Vec<String>;

/// Final interview evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// 0 – 10
    pub overall_score: f64,
    pub strengths: String,
    pub weaknesses: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    #[error("no structured data found in model reply")]
    NoStructuredData,

    #[error("malformed JSON payload: {0}")]
    MalformedPayload(String),

    #[error("report is missing required keys: {}", .missing.join(", "))]
    IncompleteReport { missing: Vec<&'static str> },
}

/// Extracts a list of question strings.
///
/// Looks for a fenced ```json block first, then accepts the whole reply if its
/// trimmed text is bracketed by `[` and `]`.
pub fn extract_list(reply: &str) -> Result<QuestionSet, ExtractionFailure> {
    let candidate = fenced_json(reply)
        .or_else(|| bare_array(reply))
        .ok_or(ExtractionFailure::NoStructuredData)?;

    serde_json::from_str::<Vec<String>>(candidate)
        .map_err(|e| ExtractionFailure::MalformedPayload(e.to_string()))
}

/// Extracts a report object. Only fenced ```json blocks are considered.
pub fn extract_report(reply: &str) -> Result<Report, ExtractionFailure> {
    let candidate = fenced_json(reply).ok_or(ExtractionFailure::NoStructuredData)?;

    let object: Map<String, Value> = serde_json::from_str(candidate)
        .map_err(|e| ExtractionFailure::MalformedPayload(e.to_string()))?;

    let missing: Vec<&'static str> = REPORT_KEYS
        .into_iter()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(ExtractionFailure::IncompleteReport { missing });
    }

    let report: Report = serde_json::from_value(Value::Object(object))
        .map_err(|e| ExtractionFailure::MalformedPayload(e.to_string()))?;

    if !(0.0..=10.0).contains(&report.overall_score) {
        return Err(ExtractionFailure::MalformedPayload(format!(
            "overallScore {} is outside 0-10",
            report.overall_score
        )));
    }

    Ok(report)
}

fn fenced_json_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fenced json pattern is valid")
    })
}

/// Content of the first ```json fenced block, trimmed.
fn fenced_json(reply: &str) -> Option<&str> {
    fenced_json_pattern()
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

fn bare_array(reply: &str) -> Option<&str> {
    let trimmed = reply.trim();
    (trimmed.starts_with('[') && trimmed.ends_with(']')).then_some(trimmed)
}
