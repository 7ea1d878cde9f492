use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio_api::config::Config;
use folio_api::db::create_pool;
use folio_api::llm_client::LlmClient;
use folio_api::resumes::images::build_image_host;
use folio_api::resumes::service::ResumeService;
use folio_api::resumes::store::PgResumeStore;
use folio_api::routes::build_router;
use folio_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Folio API v{} ({:?})",
        env!("CARGO_PKG_VERSION"),
        config.environment
    );

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize image host (ImageKit, S3 / MinIO, or disabled)
    let images = build_image_host(&config.image_host).await;

    // Initialize LLM client
    let llm = LlmClient::new(
        config.llm_api_key.clone(),
        &config.llm_base_url,
        config.llm_model.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model());

    let state = AppState {
        resumes: ResumeService::new(Arc::new(PgResumeStore::new(db)), images),
        llm: Arc::new(llm),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
