use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::cors::CorsLayer;

use crate::sentiment::{coerce_phrase, ScoreResult, Scorer};

#[derive(Clone)]
pub struct AppState {
    scorer: Scorer,
}

pub fn router(scorer: Scorer) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze", post(analyze))
        .route("/batch", post(analyze_batch))
        .route("/languages", get(languages))
        .layer(CorsLayer::very_permissive())
        .with_state(AppState { scorer })
}

/// `text` may be any JSON value; see [`coerce_phrase`].
#[derive(Debug, serde::Deserialize)]
struct AnalyzeReq {
    #[serde(default)]
    text: Value,
    #[serde(default)]
    language: Option<String>,
}

impl AnalyzeReq {
    fn score_with(&self, scorer: &Scorer) -> ScoreResult {
        scorer.score(&coerce_phrase(&self.text), self.language.as_deref())
    }
}

async fn analyze(State(state): State<AppState>, Json(body): Json<AnalyzeReq>) -> Json<ScoreResult> {
    Json(body.score_with(&state.scorer))
}

async fn analyze_batch(
    State(state): State<AppState>,
    Json(items): Json<Vec<AnalyzeReq>>,
) -> Json<Vec<ScoreResult>> {
    let scored = items
        .iter()
        .map(|it| it.score_with(&state.scorer))
        .collect::<Vec<_>>();
    Json(scored)
}

async fn languages(State(state): State<AppState>) -> Json<Vec<String>> {
    let codes = state
        .scorer
        .lexicon()
        .languages()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(codes)
}
