use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatModel;
use crate::resumes::service::ResumeService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub resumes: ResumeService,
    /// Chat model behind the analyzer and enhancement endpoints.
    pub llm: Arc<dyn ChatModel>,
    pub config: Config,
}
