//! The recommendation orchestrator: filter, backfill, rank, truncate.

use std::sync::Arc;

use async_trait::async_trait;
use rand::thread_rng;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::{GeminiClient, LlmError};
use crate::models::Profile;
use crate::recommend::backfill::backfill;
use crate::recommend::criteria::Criteria;
use crate::recommend::filter::filter_profiles;
use crate::recommend::parser::parse_ranking;
use crate::recommend::prompts::build_ranking_prompt;
use crate::store::ProfileStore;

/// Low temperature keeps the id ordering stable across identical requests.
const RANKING_TEMPERATURE: f32 = 0.3;
const RANKING_MAX_TOKENS: u32 = 2000;

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("AI ranking requested but no ranker is configured")]
    RankerUnavailable,

    #[error("Ranking call failed: {0}")]
    Ranker(#[from] LlmError),
}

/// Seam to the external ranking service: prompt in, untrusted text out.
/// Tests substitute a canned implementation.
#[async_trait]
pub trait Ranker: Send + Sync {
    async fn rank(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl Ranker for GeminiClient {
    async fn rank(&self, prompt: &str) -> Result<String, LlmError> {
        self.generate(prompt, RANKING_TEMPERATURE, Some(RANKING_MAX_TOKENS))
            .await
    }
}

/// End-to-end recommendation pipeline over the read-only profile store.
#[derive(Clone)]
pub struct Recommender {
    store: Arc<ProfileStore>,
    /// `None` when no API key is configured; non-AI requests still work.
    ranker: Option<Arc<dyn Ranker>>,
}

impl Recommender {
    pub fn new(store: Arc<ProfileStore>, ranker: Option<Arc<dyn Ranker>>) -> Self {
        Self { store, ranker }
    }

    /// Produces up to `top_k` profiles for the given criteria.
    ///
    /// Description-only and empty searches skip filtering and hand the full
    /// collection to the ranker. Structured searches run the strict filter,
    /// fall back to the relaxed filter when strict matches nothing, and
    /// backfill with random profiles when still short of `top_k`. A failed
    /// ranking call propagates; an unparsable ranking reply does not.
    pub async fn recommend(
        &self,
        criteria: &Criteria,
        top_k: usize,
        use_ai_ranking: bool,
    ) -> Result<Vec<Profile>, RecommendError> {
        let all = self.store.all();

        let mut candidates = if !criteria.has_structured() {
            debug!("No structured criteria; ranking over all {} profiles", all.len());
            all.to_vec()
        } else {
            let mut filtered = filter_profiles(all, criteria, true);
            debug!("Strict filter matched {} profiles", filtered.len());

            if filtered.is_empty() {
                filtered = filter_profiles(all, criteria, false);
                debug!("Relaxed filter matched {} profiles", filtered.len());
            }

            if filtered.len() < top_k {
                filtered = backfill(filtered, all, top_k, &mut thread_rng());
                debug!("Backfilled to {} profiles", filtered.len());
            }

            filtered
        };

        if use_ai_ranking && !candidates.is_empty() {
            let ranker = self
                .ranker
                .as_ref()
                .ok_or(RecommendError::RankerUnavailable)?;
            let prompt = build_ranking_prompt(&candidates, criteria, top_k);
            let reply = ranker.rank(&prompt).await?;
            candidates = parse_ranking(&reply, &candidates);
        }

        candidates.truncate(top_k);
        Ok(candidates)
    }
}
