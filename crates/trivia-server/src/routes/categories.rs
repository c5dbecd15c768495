//! Category endpoints.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use serde::Serialize;

use crate::error::ApiResult;
use crate::routes::Success;
use crate::state::AppState;
use trivia_core::{Category, CategoryId, CategoryList, CategoryQuestions};

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category: Category,
}

/// List category names.
/// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Success<CategoryList>>> {
    let categories = state.service().get_categories().await?;
    Ok(Success::json(categories))
}

/// Get a single category.
/// GET /categories/:id
pub async fn get_category(
    State(state): State<AppState>,
    path: Result<Path<CategoryId>, PathRejection>,
) -> ApiResult<Json<Success<CategoryResponse>>> {
    let Path(id) = path?;
    let category = state.service().get_category(id).await?;
    Ok(Success::json(CategoryResponse { category }))
}

/// Questions belonging to a category.
/// GET /categories/:id/questions
pub async fn get_category_questions(
    State(state): State<AppState>,
    path: Result<Path<CategoryId>, PathRejection>,
) -> ApiResult<Json<Success<CategoryQuestions>>> {
    let Path(id) = path?;
    let questions = state.service().get_questions_by_category(id).await?;
    Ok(Success::json(questions))
}
