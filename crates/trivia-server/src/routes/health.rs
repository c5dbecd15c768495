//! Health check endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub total_questions: usize,
    pub version: String,
}

/// Health check endpoint.
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let total_questions = state.service().store().count().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        total_questions,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
