use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Path, Query, Request, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::{Resume, ResumePatch, Template};
use crate::render::{render, RenderedDocument};
use crate::resumes::images::ImageUpload;
use crate::resumes::service::NewResume;
use crate::state::AppState;
use crate::upload::{is_multipart, multipart_error, read_file, read_text};

#[derive(Debug, Default, Deserialize)]
pub struct CreateResumeRequest {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    pub template: Option<Template>,
}

#[derive(Serialize)]
pub struct UpdateResumeResponse {
    pub message: &'static str,
    pub resume: Resume,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Ids that do not parse cannot name a resume.
pub fn parse_resume_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::resume_not_found())
}

// ────────────────────────────────────────────────────────────────────────────
// Update form
// ────────────────────────────────────────────────────────────────────────────

const INVALID_RESUME_DATA: &str = "Invalid resume data format";

/// JSON shape of an update. `resumeData` may be an object or a JSON string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateJson {
    resume_id: Option<String>,
    resume_data: Option<Value>,
    #[serde(default)]
    remove_background: Option<Value>,
}

/// A resume update as sent by the builder, either as JSON or as multipart
/// form data carrying a profile photo in the `image` field.
#[derive(Debug)]
pub struct UpdateForm {
    pub resume_id: Uuid,
    pub patch: ResumePatch,
    pub image: Option<ImageUpload>,
}

fn parse_patch(data: Value) -> Result<ResumePatch, AppError> {
    let data = match data {
        Value::String(text) => serde_json::from_str::<Value>(&text)
            .map_err(|_| AppError::Validation(INVALID_RESUME_DATA.to_string()))?,
        other => other,
    };
    if !data.is_object() {
        return Err(AppError::Validation(INVALID_RESUME_DATA.to_string()));
    }
    serde_json::from_value(data).map_err(|_| AppError::Validation(INVALID_RESUME_DATA.to_string()))
}

fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true",
        _ => false,
    }
}

impl UpdateForm {
    fn assemble(
        resume_id: Option<String>,
        resume_data: Option<Value>,
        image: Option<crate::upload::UploadedFile>,
        remove_background: bool,
    ) -> Result<Self, AppError> {
        let resume_id = resume_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::Validation("resumeId is required".to_string()))?;
        let resume_id = parse_resume_id(&resume_id)?;

        let patch = match resume_data {
            Some(data) => parse_patch(data)?,
            None => return Err(AppError::Validation("resumeData is required".to_string())),
        };

        let image = match image {
            Some(file) if !file.is_image() => {
                return Err(AppError::Validation(
                    "Profile image must be an image file".to_string(),
                ))
            }
            Some(file) => Some(ImageUpload {
                file_name: file.file_name,
                content_type: file.content_type,
                bytes: file.bytes,
                remove_background,
            }),
            None => None,
        };

        Ok(Self {
            resume_id,
            patch,
            image,
        })
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut resume_id = None;
        let mut resume_data = None;
        let mut remove_background = false;
        let mut image = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "image" => image = Some(read_file(field).await?),
                "resumeId" => resume_id = Some(read_text(field).await?),
                "resumeData" => resume_data = Some(Value::String(read_text(field).await?)),
                "removeBackground" => remove_background = read_text(field).await? == "true",
                _ => {}
            }
        }

        Self::assemble(resume_id, resume_data, image, remove_background)
    }
}

#[async_trait]
impl<S> FromRequest<S> for UpdateForm
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

        let Json(body) = Json::<UpdateJson>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        let remove_background = body.remove_background.as_ref().is_some_and(flag);
        Self::assemble(body.resume_id, body.resume_data, None, remove_background)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resumes/create
pub async fn handle_create(
    State(state): State<AppState>,
    user: AuthUser,
    body: Option<Json<CreateResumeRequest>>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let Json(req) = body.unwrap_or_default();
    let resume = state
        .resumes
        .create(NewResume {
            user_id: user.user_id,
            title: req.title.as_deref(),
            full_name: user.name.as_deref(),
            email: user.email.as_deref(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

/// GET /api/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Resume>>, AppError> {
    Ok(Json(state.resumes.list(user.user_id).await?))
}

/// GET /api/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_resume_id(&id)?;
    Ok(Json(state.resumes.get(user.user_id, id).await?))
}

/// GET /api/resumes/public/:id
pub async fn handle_get_public(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_resume_id(&id)?;
    Ok(Json(state.resumes.get_public(id).await?))
}

/// GET /api/resumes/:id/render?template=
pub async fn handle_render(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Json<RenderedDocument>, AppError> {
    let id = parse_resume_id(&id)?;
    let resume = state.resumes.get(user.user_id, id).await?;
    let template = query.template.unwrap_or(resume.template);
    Ok(Json(render(&resume, template)))
}

/// GET /api/resumes/public/:id/render?template=
pub async fn handle_render_public(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Json<RenderedDocument>, AppError> {
    let id = parse_resume_id(&id)?;
    let resume = state.resumes.get_public(id).await?;
    let template = query.template.unwrap_or(resume.template);
    Ok(Json(render(&resume, template)))
}

/// PUT /api/resumes/update
pub async fn handle_update(
    State(state): State<AppState>,
    user: AuthUser,
    form: UpdateForm,
) -> Result<Json<UpdateResumeResponse>, AppError> {
    let resume = state
        .resumes
        .update(user.user_id, form.resume_id, form.patch, form.image)
        .await?;
    Ok(Json(UpdateResumeResponse {
        message: "Resume updated successfully",
        resume,
    }))
}

/// DELETE /api/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_resume_id(&id)?;
    state.resumes.delete(user.user_id, id).await?;
    Ok(Json(MessageResponse {
        message: "Resume removed",
    }))
}
