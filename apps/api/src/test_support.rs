//! In-process fakes shared by unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::auth::Claims;
use crate::config::{Config, Environment, ImageHostConfig};
use crate::llm_client::{ChatModel, ChatRequest, LlmError};
use crate::models::resume::Resume;
use crate::resumes::images::{ImageHost, ImageHostError, ImageUpload};
use crate::resumes::service::ResumeService;
use crate::resumes::store::ResumeStore;
use crate::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret";

// ────────────────────────────────────────────────────────────────────────────
// Chat model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub system: String,
    pub user: String,
    pub temperature: Option<f32>,
}

/// Answers every call with a canned reply, or fails every call.
pub struct StubModel {
    reply: Option<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatModel for StubModel {
    async fn complete(&self, request: ChatRequest<'_>) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            system: request.system.to_string(),
            user: request.user.to_string(),
            temperature: request.temperature,
        });
        self.reply.clone().ok_or(LlmError::Api {
            status: 503,
            message: "model unavailable".to_string(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Storage
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryResumeStore {
    rows: Mutex<HashMap<Uuid, Resume>>,
}

impl InMemoryResumeStore {
    pub fn get(&self, id: Uuid) -> Option<Resume> {
        self.rows.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn insert(&self, resume: &Resume) -> Result<(), sqlx::Error> {
        self.rows.lock().unwrap().insert(resume.id, resume.clone());
        Ok(())
    }

    async fn list_for_owner(&self, user_id: Uuid) -> Result<Vec<Resume>, sqlx::Error> {
        let mut owned: Vec<Resume> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(owned)
    }

    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> Result<Option<Resume>, sqlx::Error> {
        Ok(self.get(id).filter(|r| r.user_id == user_id))
    }

    async fn find_public(&self, id: Uuid) -> Result<Option<Resume>, sqlx::Error> {
        Ok(self.get(id).filter(|r| r.is_public))
    }

    async fn replace_owned(&self, resume: &Resume) -> Result<bool, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&resume.id) {
            Some(existing) if existing.user_id == resume.user_id => {
                *existing = resume.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_owned(&self, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        if rows.get(&id).is_some_and(|r| r.user_id == user_id) {
            rows.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Image host
// ────────────────────────────────────────────────────────────────────────────

/// Records the transformation of every upload it receives.
pub struct RecordingImageHost {
    fail: bool,
    uploads: Mutex<Vec<String>>,
}

impl RecordingImageHost {
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageHost for RecordingImageHost {
    async fn upload(&self, image: &ImageUpload) -> Result<String, ImageHostError> {
        self.uploads.lock().unwrap().push(image.transformation());
        if self.fail {
            return Err(ImageHostError::Api {
                status: 500,
                message: "upload rejected".to_string(),
            });
        }
        Ok(format!("https://images.test/{}", image.storage_name()))
    }
}

pub fn png_upload(remove_background: bool) -> ImageUpload {
    ImageUpload {
        file_name: "photo.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: Bytes::from_static(b"\x89PNG\r\n\x1a\n"),
        remove_background,
    }
}

pub fn service_with(
    images: RecordingImageHost,
) -> (ResumeService, Arc<InMemoryResumeStore>, Arc<RecordingImageHost>) {
    let store = Arc::new(InMemoryResumeStore::default());
    let images = Arc::new(images);
    let service = ResumeService::new(store.clone(), images.clone());
    (service, store, images)
}

// ────────────────────────────────────────────────────────────────────────────
// App state & auth
// ────────────────────────────────────────────────────────────────────────────

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        llm_api_key: "unused".to_string(),
        llm_base_url: "http://localhost:0".to_string(),
        llm_model: "stub".to_string(),
        image_host: ImageHostConfig::Disabled,
        environment: Environment::Development,
        port: 0,
        rust_log: "debug".to_string(),
    }
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryResumeStore>,
    pub images: Arc<RecordingImageHost>,
    pub model: Arc<StubModel>,
}

pub fn test_app(model: StubModel) -> TestApp {
    let (resumes, store, images) = service_with(RecordingImageHost::succeeding());
    let model = Arc::new(model);
    let state = AppState {
        resumes,
        llm: model.clone(),
        config: test_config(),
    };
    TestApp {
        state,
        store,
        images,
        model,
    }
}

/// A valid bearer token for `user_id`, signed with [`TEST_JWT_SECRET`].
pub fn issue_token(user_id: Uuid, name: Option<&str>, email: Option<&str>) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        name: name.map(str::to_string),
        email: email.map(str::to_string),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}
