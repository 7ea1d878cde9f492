//! Content enhancement: single-turn rewrites of a summary or a job's bullets.

use serde::Deserialize;
use tracing::error;

use crate::ai::prompts::{enhance_job_prompt, ENHANCE_SUMMARY_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, RESUME_EXPERT_PERSONA};
use crate::llm_client::{complete_json, ChatModel, ChatRequest};

const ENHANCEMENT_FAILED: &str = "AI Enhancement failed";

/// A job description as sent by the builder: either free text or bullets.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DescriptionInput {
    Bullets(Vec<String>),
    Text(String),
}

impl DescriptionInput {
    /// Bullets are joined one per line.
    pub fn into_text(self) -> String {
        match self {
            DescriptionInput::Bullets(lines) => lines.join("\n"),
            DescriptionInput::Text(text) => text,
        }
    }
}

/// Rewrites a professional summary. Returns the model's text verbatim.
pub async fn enhance_summary(model: &dyn ChatModel, current: &str) -> Result<String, AppError> {
    if current.trim().is_empty() {
        return Err(AppError::Validation("Content is required".to_string()));
    }

    let system = format!("{RESUME_EXPERT_PERSONA} {ENHANCE_SUMMARY_SYSTEM}");
    model
        .complete(ChatRequest {
            system: &system,
            user: current,
            temperature: None,
        })
        .await
        .map_err(|e| {
            error!("Summary enhance error: {e}");
            AppError::Llm(ENHANCEMENT_FAILED.to_string())
        })
}

/// Rewrites a job's description into achievement-focused bullets.
pub async fn enhance_job_description(
    model: &dyn ChatModel,
    description: &str,
    role: &str,
    company: &str,
) -> Result<Vec<String>, AppError> {
    if description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }

    let system = format!("{RESUME_EXPERT_PERSONA} {JSON_ONLY_INSTRUCTION}");
    let prompt = enhance_job_prompt(role, company, description);

    complete_json::<Vec<String>>(
        model,
        ChatRequest {
            system: &system,
            user: &prompt,
            temperature: None,
        },
    )
    .await
    .map_err(|e| {
        error!("Job enhance error: {e}");
        AppError::Llm(ENHANCEMENT_FAILED.to_string())
    })
}
