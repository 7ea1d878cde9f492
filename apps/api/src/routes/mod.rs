pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::ai::handlers as ai;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::upload::MAX_REQUEST_BYTES;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resumes
        .route("/api/resumes", get(resumes::handle_list))
        .route("/api/resumes/create", post(resumes::handle_create))
        .route("/api/resumes/update", put(resumes::handle_update))
        .route(
            "/api/resumes/:id",
            get(resumes::handle_get).delete(resumes::handle_delete),
        )
        .route("/api/resumes/:id/render", get(resumes::handle_render))
        .route("/api/resumes/public/:id", get(resumes::handle_get_public))
        .route(
            "/api/resumes/public/:id/render",
            get(resumes::handle_render_public),
        )
        // AI
        .route("/api/ai/enhance-summary", post(ai::handle_enhance_summary))
        .route(
            "/api/ai/enhance-job-description",
            post(ai::handle_enhance_job_description),
        )
        .route("/api/ai/analyze", post(ai::handle_analyze))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(state)
}
