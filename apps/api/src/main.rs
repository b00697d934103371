mod analysis;
mod classify;
mod config;
mod errors;
mod extract;
mod render;
mod review;
mod rewrite;
mod routes;
mod state;
mod suggest;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggest::llm::{LlmClient, LlmSuggestionProvider};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeRocket API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Limits: upload {} bytes, text {} bytes, quantifier window {}",
        config.max_upload_bytes, config.max_text_bytes, config.analysis.quantifier_window
    );

    let mut state = AppState::local(config.clone());

    // Remote suggestions only when a key is configured
    if let Some(api_key) = config.anthropic_api_key.clone() {
        match LlmClient::new(api_key) {
            Ok(client) => {
                info!("LLM client initialized (model: {})", suggest::llm::MODEL);
                state.suggestions = Some(Arc::new(LlmSuggestionProvider::new(client)));
            }
            Err(e) => warn!("LLM client unavailable, using local suggestions: {e}"),
        }
    } else {
        info!("No ANTHROPIC_API_KEY set; using local suggestions only");
    }

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
