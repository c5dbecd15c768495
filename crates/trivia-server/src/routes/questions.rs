//! Question endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::routes::Success;
use crate::state::AppState;
use trivia_core::{
    parse_page, CreateOutcome, DeleteOutcome, ErrorKind, QuestionDraft, QuestionId,
    QuestionPage, SearchResults,
};

/// Query parameters for the question listing.
///
/// `page` is kept raw so a malformed value falls back to the first page
/// instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// List questions a page at a time.
/// GET /questions?page=N
pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Success<QuestionPage>>> {
    let page = parse_page(query.page.as_deref());
    let listing = state.service().get_questions(page).await?;
    Ok(Success::json(listing))
}

/// Create a question.
/// POST /questions
pub async fn create_question(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Success<CreateOutcome>>> {
    let Json(body) = body.map_err(|rejection| {
        debug!(error = %rejection, "Rejected question body");
        ApiError::from_kind(ErrorKind::Unprocessable)
    })?;
    let draft: QuestionDraft = serde_json::from_value(body).map_err(|e| {
        debug!(error = %e, "Malformed question draft");
        ApiError::from_kind(ErrorKind::Unprocessable)
    })?;

    let outcome = state.service().create_question(draft).await?;
    Ok(Success::json(outcome))
}

/// Delete a question by id.
/// DELETE /questions/:id
pub async fn delete_question(
    State(state): State<AppState>,
    path: Result<Path<QuestionId>, PathRejection>,
) -> ApiResult<Json<Success<DeleteOutcome>>> {
    let Path(id) = path?;
    let outcome = state.service().delete_question(id).await?;
    Ok(Success::json(outcome))
}

/// Case-insensitive substring search over question text.
/// POST /questions/search
pub async fn search_questions(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Success<SearchResults>>> {
    let Json(body) = body?;
    let term = body.get("searchTerm").and_then(Value::as_str);

    let results = state.service().search_questions(term).await?;
    Ok(Success::json(results))
}
