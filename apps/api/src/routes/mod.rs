pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::questions;
use crate::recommend::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/options", get(handlers::handle_options))
        .route("/api/recommend", post(handlers::handle_recommend))
        .route(
            "/api/generate-question",
            post(questions::handle_generate_question),
        )
        .with_state(state)
}
