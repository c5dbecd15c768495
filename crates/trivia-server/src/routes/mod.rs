//! Route definitions for the REST API.

mod categories;
mod health;
mod questions;
mod quiz;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Success envelope: `{"success": true, ...payload}`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> Success<T> {
    pub fn json(payload: T) -> Json<Self> {
        Json(Self {
            success: true,
            payload,
        })
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check).fallback(method_not_allowed))
        // Categories
        .route(
            "/categories",
            get(categories::list_categories).fallback(method_not_allowed),
        )
        .route(
            "/categories/:id",
            get(categories::get_category).fallback(method_not_allowed),
        )
        .route(
            "/categories/:id/questions",
            get(categories::get_category_questions).fallback(method_not_allowed),
        )
        // Questions
        .route(
            "/questions",
            get(questions::list_questions)
                .post(questions::create_question)
                .fallback(method_not_allowed),
        )
        .route(
            "/questions/:id",
            delete(questions::delete_question).fallback(method_not_allowed),
        )
        .route(
            "/questions/search",
            post(questions::search_questions).fallback(method_not_allowed),
        )
        // Quiz
        .route("/quiz", post(quiz::next_question).fallback(method_not_allowed))
        .route("/quizzes", post(quiz::next_question).fallback(method_not_allowed))
        .fallback(not_found)
        // Attach state
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::from_kind(trivia_core::ErrorKind::NotFound)
}

// Known path, unsupported method.
async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

pub use categories::*;
pub use health::*;
pub use questions::*;
pub use quiz::*;
