mod config;
mod errors;
mod llm_client;
mod models;
mod questions;
mod recommend;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::recommend::engine::{Ranker, Recommender};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::ProfileStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Matchpoint API v{}", env!("CARGO_PKG_VERSION"));

    // Load the profile collection; it is read-only from here on
    let store = Arc::new(ProfileStore::load(&config.profiles_path)?);
    let options = Arc::new(store.filter_options());

    // Initialize LLM client; without a key the non-AI endpoints still serve
    let llm = match config.gemini_api_key.clone() {
        Some(key) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(GeminiClient::new(key))
        }
        None => {
            warn!("GEMINI_API_KEY not set; AI ranking and question generation are disabled");
            None
        }
    };

    let ranker = llm
        .clone()
        .map(|client| Arc::new(client) as Arc<dyn Ranker>);
    let recommender = Recommender::new(store, ranker);

    let state = AppState {
        recommender,
        llm,
        options,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
