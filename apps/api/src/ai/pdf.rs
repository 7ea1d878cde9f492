//! Plain-text extraction from uploaded PDFs.
//!
//! Parsing is CPU-bound and runs inside `tokio::task::spawn_blocking`.

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("File buffer is empty")]
    EmptyBuffer,

    #[error("PDF parsing failed: {0}")]
    Parse(String),

    #[error("No text could be extracted from PDF")]
    NoText,

    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<PdfError> for AppError {
    fn from(e: PdfError) -> Self {
        AppError::Pdf(format!(
            "Failed to read PDF file: {e}. Please ensure the PDF contains selectable text."
        ))
    }
}

/// Extracts the text layer of a PDF. Scanned (image-only) PDFs yield [`PdfError::NoText`].
pub async fn extract_text(pdf: Bytes) -> Result<String, PdfError> {
    if pdf.is_empty() {
        return Err(PdfError::EmptyBuffer);
    }

    debug!("Extracting PDF text, buffer size: {}", pdf.len());

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await?
        .map_err(|e| {
            warn!("PDF parse error: {e}");
            PdfError::Parse(e.to_string())
        })?;

    if text.trim().is_empty() {
        return Err(PdfError::NoText);
    }

    debug!("PDF text extracted, length: {}", text.len());
    Ok(text)
}
