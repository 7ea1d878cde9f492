//! ATS analyzer: scores resume text against a job description via the LLM.
//!
//! The server does no scoring of its own. It bounds the input, asks the model
//! for a fixed JSON schema, and rejects answers that do not match it.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ai::prompts::{analyze_user_prompt, ANALYZE_SYSTEM, ANALYZE_TEMPERATURE};
use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, ChatModel, ChatRequest};
use crate::upload::UploadedFile;

/// Hard caps applied before transmission. Plain character slicing, not sentence-aware.
pub const MAX_RESUME_CHARS: usize = 15_000;
pub const MAX_JOB_DESCRIPTION_CHARS: usize = 5_000;

/// Keys a model answer must carry to be accepted.
const REQUIRED_KEYS: [&str; 3] = ["score", "categories", "keywords"];

// ────────────────────────────────────────────────────────────────────────────
// Report schema
// ────────────────────────────────────────────────────────────────────────────

/// Accepts any JSON number in [0, 100] and rounds it to an integer score.
fn score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(D::Error::custom(format!("score {value} is outside 0-100")));
    }
    Ok(value.round() as u8)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryScore {
    #[serde(deserialize_with = "score")]
    pub score: u8,
    pub feedback: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Categories {
    pub tone_style: CategoryScore,
    pub content: CategoryScore,
    pub structure: CategoryScore,
    pub skills: CategoryScore,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keywords {
    pub present: Vec<String>,
    pub missing: Vec<String>,
}

/// Structured critique returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(deserialize_with = "score")]
    pub score: u8,
    #[serde(default)]
    pub summary: String,
    pub categories: Categories,
    pub keywords: Keywords,
    /// Critical fixes, most important first.
    #[serde(default)]
    pub improvements: Vec<String>,
    /// Optional enhancements.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AnalysisParseError {
    #[error("Could not parse AI response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid AI response: {0}")]
    Invalid(String),
}

/// Parses raw model output into a report, enforcing the required keys.
pub fn parse_analysis(raw: &str) -> Result<AnalysisReport, AnalysisParseError> {
    let value: Value = serde_json::from_str(strip_json_fences(raw))?;

    let object = value
        .as_object()
        .ok_or_else(|| AnalysisParseError::Invalid("expected a JSON object".to_string()))?;

    for key in REQUIRED_KEYS {
        if object.get(key).map_or(true, Value::is_null) {
            return Err(AnalysisParseError::Invalid(format!("missing `{key}`")));
        }
    }

    serde_json::from_value(value).map_err(|e| AnalysisParseError::Invalid(e.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Input assembly
// ────────────────────────────────────────────────────────────────────────────

/// Where the resume text comes from. Listed in precedence order.
#[derive(Debug, Clone)]
pub enum ResumeSource {
    Pdf(UploadedFile),
    Text(String),
    Stored(Uuid),
}

/// Raw analyzer inputs as received, before the required-field checks.
#[derive(Debug, Default)]
pub struct AnalyzeInput {
    /// Uploaded `resume` file. Only PDFs are accepted, checked in [`AnalyzeInput::require`].
    pub file: Option<UploadedFile>,
    pub resume_text: Option<String>,
    pub resume_id: Option<Uuid>,
    pub job_description: Option<String>,
}

impl AnalyzeInput {
    /// Resolves the resume source and job description, or fails with a 400.
    ///
    /// Both required-field checks run before the file type check and any PDF
    /// work, so a missing job description is reported whatever resume input
    /// was sent.
    pub fn require(self) -> Result<(ResumeSource, String), AppError> {
        let source = if let Some(file) = self.file {
            ResumeSource::Pdf(file)
        } else if let Some(text) = self.resume_text.filter(|t| !t.trim().is_empty()) {
            ResumeSource::Text(text)
        } else if let Some(id) = self.resume_id {
            ResumeSource::Stored(id)
        } else {
            return Err(AppError::Validation(
                "Resume file (PDF) or text is required".to_string(),
            ));
        };

        let job_description = self
            .job_description
            .filter(|jd| !jd.trim().is_empty())
            .ok_or_else(|| AppError::Validation("Job description is required".to_string()))?;

        let source = match source {
            ResumeSource::Pdf(file) if !file.is_pdf() => {
                return Err(AppError::Validation(
                    "Resume file must be a PDF".to_string(),
                ));
            }
            other => other,
        };

        Ok((source, job_description))
    }
}

/// Returns at most `max` characters of `text`, never splitting a UTF-8 sequence.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn build_user_prompt(resume_text: &str, job_description: &str) -> String {
    analyze_user_prompt(
        truncate_chars(job_description, MAX_JOB_DESCRIPTION_CHARS),
        truncate_chars(resume_text, MAX_RESUME_CHARS),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis call
// ────────────────────────────────────────────────────────────────────────────

/// Sends the bounded inputs to the model and validates its answer.
///
/// `expose_raw` controls whether unparseable model output is echoed back in the error.
pub async fn analyze(
    model: &dyn ChatModel,
    resume_text: &str,
    job_description: &str,
    expose_raw: bool,
) -> Result<AnalysisReport, AppError> {
    let prompt = build_user_prompt(resume_text, job_description);

    let raw = model
        .complete(ChatRequest {
            system: ANALYZE_SYSTEM,
            user: &prompt,
            temperature: Some(ANALYZE_TEMPERATURE),
        })
        .await
        .map_err(|e| AppError::Llm(format!("Analysis failed: {e}")))?;

    match parse_analysis(&raw) {
        Ok(report) => {
            info!("ATS analysis completed, score: {}", report.score);
            Ok(report)
        }
        Err(e) => {
            warn!("Rejected AI analysis response: {e}; raw: {raw}");
            Err(AppError::AiResponse {
                message: e.to_string(),
                raw: expose_raw.then_some(raw),
            })
        }
    }
}
