//! Dynamic onboarding question generation.
//!
//! Failures here never surface to the caller: a canned fallback question
//! keeps the onboarding flow moving when the model is down or returns
//! something unusable.

pub mod prompts;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::strip_json_fences;
use crate::questions::prompts::build_question_prompt;
use crate::state::AppState;

/// High temperature: variety matters more than stability here.
const QUESTION_TEMPERATURE: f32 = 0.9;
const MAX_OPTIONS: usize = 3;

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionRequest {
    #[serde(default)]
    pub previous_answers: Vec<String>,
    #[serde(default = "default_question_number")]
    pub question_number: u32,
}

fn default_question_number() -> u32 {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub options: Vec<String>,
}

/// POST /api/generate-question
pub async fn handle_generate_question(
    State(state): State<AppState>,
    Json(req): Json<GenerateQuestionRequest>,
) -> Json<GeneratedQuestion> {
    let Some(llm) = state.llm.as_ref() else {
        warn!("Question generation requested but no LLM client is configured");
        return Json(fallback_question(req.question_number));
    };

    let prompt = build_question_prompt(&req.previous_answers, req.question_number);

    match llm.generate(&prompt, QUESTION_TEMPERATURE, None).await {
        Ok(text) => match parse_question(&text) {
            Some(question) => Json(question),
            None => {
                warn!("Unparsable question reply: {text:?}");
                Json(fallback_question(req.question_number))
            }
        },
        Err(e) => {
            warn!("Question generation failed: {e}");
            Json(fallback_question(req.question_number))
        }
    }
}

/// Parses the model reply as a `{question, options}` object, tolerating
/// markdown code fences and over-long option lists.
fn parse_question(text: &str) -> Option<GeneratedQuestion> {
    let cleaned = strip_json_fences(text);
    let mut parsed: GeneratedQuestion = serde_json::from_str(cleaned).ok()?;
    if parsed.question.is_empty() || parsed.options.is_empty() {
        return None;
    }
    parsed.options.truncate(MAX_OPTIONS);
    Some(parsed)
}

/// Two-entry fallback table keyed by `question_number % 2`.
fn fallback_question(question_number: u32) -> GeneratedQuestion {
    if question_number % 2 == 0 {
        GeneratedQuestion {
            question: "What's your ideal weekend?".to_string(),
            options: vec![
                "Adventure outdoors".to_string(),
                "Cozy at home".to_string(),
                "Social activities".to_string(),
            ],
        }
    } else {
        GeneratedQuestion {
            question: "What matters most to you?".to_string(),
            options: vec![
                "Humor & fun".to_string(),
                "Deep conversations".to_string(),
                "Shared hobbies".to_string(),
            ],
        }
    }
}
