//! Resume text extraction — a thin wrapper over `pdf-extract`.
//!
//! No resume understanding happens here; the raw text goes straight into the
//! question prompt.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

/// File extensions accepted for upload (lowercase, without the dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("{0}")]
    Extraction(String),

    #[error("PDF parsing resulted in empty text. The PDF might be an image or corrupted.")]
    EmptyText,

    #[error("PDF extraction task failed: {0}")]
    Task(String),
}

/// Whether the uploaded file name carries an allowed extension.
pub fn is_allowed_file(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// Extracts the full text of a PDF held in memory.
///
/// Runs on the blocking pool: `pdf-extract` is CPU-bound and can panic on
/// malformed input, which is reported as an extraction error.
pub async fn extract_resume_text(pdf: Bytes) -> Result<String, ResumeError> {
    let size = pdf.len();
    let text = tokio::task::spawn_blocking(move || extract_text_from_pdf(&pdf))
        .await
        .map_err(|e| ResumeError::Task(e.to_string()))??;

    info!(bytes = size, chars = text.len(), "Extracted resume text");
    Ok(text)
}

fn extract_text_from_pdf(pdf: &[u8]) -> Result<String, ResumeError> {
    let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(pdf)
    }))
    .map_err(|_| ResumeError::Extraction("PDF parser crashed on this file".to_string()))?
    .map_err(|e| ResumeError::Extraction(e.to_string()))?;

    require_text(extracted)
}

/// Rejects whitespace-only output, typically a scanned (image-only) PDF.
fn require_text(text: String) -> Result<String, ResumeError> {
    if text.trim().is_empty() {
        debug!("PDF yielded no extractable text");
        return Err(ResumeError::EmptyText);
    }
    Ok(text)
}
