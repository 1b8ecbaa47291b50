use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::Profile;
use crate::recommend::criteria::Criteria;
use crate::state::AppState;
use crate::store::FilterOptions;

const DEFAULT_TOP_K: usize = 5;
const FALLBACK_TOP_K: usize = 50;
const MAX_TOP_K: usize = 100;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub criteria: Criteria,
    #[serde(default)]
    pub top_k: Option<i64>,
    #[serde(default = "default_use_ai_ranking")]
    pub use_ai_ranking: bool,
}

fn default_use_ai_ranking() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub success: bool,
    pub recommendations: Vec<Profile>,
    pub count: usize,
}

/// POST /api/recommend
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    let top_k = clamp_top_k(req.top_k);
    let recommendations = state
        .recommender
        .recommend(&req.criteria, top_k, req.use_ai_ranking)
        .await?;

    info!("Returning {} recommendation(s)", recommendations.len());
    Ok(Json(RecommendResponse {
        success: true,
        count: recommendations.len(),
        recommendations,
    }))
}

/// GET /api/options
pub async fn handle_options(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(state.options.as_ref().clone())
}

/// Out-of-range values fall back to 50 instead of being rejected; the
/// frontend relies on this permissiveness.
fn clamp_top_k(requested: Option<i64>) -> usize {
    match requested {
        None => DEFAULT_TOP_K,
        Some(k) if (1..=MAX_TOP_K as i64).contains(&k) => k as usize,
        Some(_) => FALLBACK_TOP_K,
    }
}
