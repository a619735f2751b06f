// src/api.rs
//! Thin HTTP boundary over the engine: JSON in, JSON out.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::analyze::ScoreResult;
use crate::error::PipelineError;
use crate::pipeline::{ClaimReport, Engine};
use crate::types::{EvidenceItem, FactCheckEntry, FactCheckResult};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/score", post(score))
        .route("/fact-check", post(fact_check))
        .route("/verify", post(verify))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy", "message": "Credibility engine is running"}))
}

#[derive(Deserialize)]
struct ScoreReq {
    claim: String,
    #[serde(default)]
    evidence: Vec<EvidenceItem>,
    #[serde(default)]
    fact_checks: Vec<FactCheckEntry>,
    #[serde(default)]
    request_id: Option<String>,
}

async fn score(State(state): State<AppState>, Json(body): Json<ScoreReq>) -> Json<ScoreResult> {
    let result = state
        .engine
        .scorer
        .score(
            &body.claim,
            &body.fact_checks,
            &body.evidence,
            body.request_id.as_deref(),
        )
        .await;
    Json(result)
}

#[derive(Deserialize)]
struct FactCheckReq {
    claim: String,
    #[serde(default)]
    request_id: Option<String>,
}

async fn fact_check(
    State(state): State<AppState>,
    Json(body): Json<FactCheckReq>,
) -> Json<FactCheckResult> {
    Json(
        state
            .engine
            .fact_check(&body.claim, body.request_id.as_deref())
            .await,
    )
}

#[derive(Deserialize)]
struct VerifyReq {
    #[serde(default)]
    claims: Vec<String>,
    #[serde(default)]
    evidence: Vec<EvidenceItem>,
}

#[derive(Serialize)]
struct VerifyResp {
    status: &'static str,
    results: Vec<ClaimReport>,
}

async fn verify(State(state): State<AppState>, Json(body): Json<VerifyReq>) -> Response {
    match state.engine.verify(&body.claims, &body.evidence).await {
        Ok(results) => Json(VerifyResp {
            status: "success",
            results,
        })
        .into_response(),
        Err(e @ PipelineError::NoClaims) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "error", "message": e.to_string()})),
        )
            .into_response(),
    }
}
