//! Quiz endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::routes::Success;
use crate::state::AppState;
use trivia_core::{ErrorKind, QuestionId, QuizDraw};

/// Request body for drawing a quiz question.
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<QuestionId>,
    #[serde(default)]
    pub quiz_category: Value,
}

/// Draw the next unseen question.
/// POST /quiz, POST /quizzes
pub async fn next_question(
    State(state): State<AppState>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResult<Json<Success<QuizDraw>>> {
    // Every quiz failure surfaces as not found, including a bad body.
    let Json(request) = body.map_err(|rejection| {
        debug!(error = %rejection, "Rejected quiz body");
        ApiError::from_kind(ErrorKind::NotFound)
    })?;

    let draw = state
        .service()
        .get_next_quiz_question(&request.previous_questions, &request.quiz_category)
        .await?;
    Ok(Success::json(draw))
}
