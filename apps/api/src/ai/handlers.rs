use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ai::analyzer::{analyze, AnalysisReport, AnalyzeInput, ResumeSource};
use crate::ai::enhance::{enhance_job_description, enhance_summary, DescriptionInput};
use crate::ai::pdf::extract_text;
use crate::ai::resume_text::resume_to_text;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::resumes::handlers::parse_resume_id;
use crate::state::AppState;
use crate::upload::{is_multipart, multipart_error, read_text, read_upload};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceSummaryRequest {
    #[serde(default)]
    pub current_summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceJobRequest {
    #[serde(default)]
    pub description: Option<DescriptionInput>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResponse<T> {
    pub enhanced_content: T,
}

/// POST /api/ai/enhance-summary
pub async fn handle_enhance_summary(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<EnhanceSummaryRequest>,
) -> Result<Json<EnhanceResponse<String>>, AppError> {
    let current = req.current_summary.unwrap_or_default();
    let enhanced = enhance_summary(state.llm.as_ref(), &current).await?;
    Ok(Json(EnhanceResponse {
        enhanced_content: enhanced,
    }))
}

/// POST /api/ai/enhance-job-description
pub async fn handle_enhance_job_description(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<EnhanceJobRequest>,
) -> Result<Json<EnhanceResponse<Vec<String>>>, AppError> {
    let description = req
        .description
        .map(DescriptionInput::into_text)
        .unwrap_or_default();
    let bullets = enhance_job_description(
        state.llm.as_ref(),
        &description,
        req.role.as_deref().unwrap_or_default(),
        req.company.as_deref().unwrap_or_default(),
    )
    .await?;
    Ok(Json(EnhanceResponse {
        enhanced_content: bullets,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeJson {
    resume_text: Option<String>,
    resume_id: Option<String>,
    job_description: Option<String>,
}

/// Analyzer inputs from multipart form data (`resume` file plus text fields)
/// or from a JSON body.
#[derive(Debug)]
pub struct AnalyzeForm(pub AnalyzeInput);

fn parse_optional_id(raw: Option<String>) -> Result<Option<uuid::Uuid>, AppError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => parse_resume_id(id).map(Some),
    }
}

impl AnalyzeForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut input = AnalyzeInput::default();
        let mut resume_id = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" => input.file = Some(read_upload(field).await?),
                "resumeText" => input.resume_text = Some(read_text(field).await?),
                "jobDescription" => input.job_description = Some(read_text(field).await?),
                "resumeId" => resume_id = Some(read_text(field).await?),
                _ => {}
            }
        }

        input.resume_id = parse_optional_id(resume_id)?;
        Ok(Self(input))
    }
}

#[async_trait]
impl<S> FromRequest<S> for AnalyzeForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, AppError> {
        if is_multipart(req.headers()) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        let Json(body) = Json::<AnalyzeJson>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(Self(AnalyzeInput {
            file: None,
            resume_text: body.resume_text,
            resume_id: parse_optional_id(body.resume_id)?,
            job_description: body.job_description,
        }))
    }
}

/// POST /api/ai/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    user: AuthUser,
    AnalyzeForm(input): AnalyzeForm,
) -> Result<Json<AnalysisReport>, AppError> {
    let (source, job_description) = input.require()?;

    let resume_text = match source {
        ResumeSource::Pdf(file) => {
            info!("Analyzing uploaded PDF {} ({} bytes)", file.file_name, file.bytes.len());
            extract_text(file.bytes).await?
        }
        ResumeSource::Text(text) => text,
        ResumeSource::Stored(id) => {
            let resume = state.resumes.get(user.user_id, id).await?;
            resume_to_text(&resume)
        }
    };

    let report = analyze(
        state.llm.as_ref(),
        &resume_text,
        &job_description,
        state.config.expose_ai_debug(),
    )
    .await?;
    Ok(Json(report))
}
