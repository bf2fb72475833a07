mod auth;
mod config;
mod db;
mod documents;
mod errors;
mod llm_client;
mod models;
mod rate_limit;
mod render;
mod routes;
mod state;
mod steps;
mod suggestions;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::rate_limit::SlidingWindowLimiter;
use crate::render::TemplateRenderer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggestions::LlmSuggestionBackend;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast on missing required env vars
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_millis(config.ai_min_interval_ms),
    )?;
    info!(
        "LLM client initialized (model: {}, min interval {}ms)",
        llm_client::MODEL,
        config.ai_min_interval_ms
    );

    let request_limiter = Arc::new(SlidingWindowLimiter::new(
        Duration::from_secs(config.rate_limit_window_secs),
        config.rate_limit_max_requests,
    ));
    info!(
        "Rate limit: {} requests per {}s per client and path",
        config.rate_limit_max_requests, config.rate_limit_window_secs
    );

    let state = AppState {
        db,
        config: config.clone(),
        renderer: Arc::new(TemplateRenderer::new()),
        suggester: Arc::new(LlmSuggestionBackend { llm }),
        request_limiter,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
