//! trivia-core - Core library for the trivia question bank.
//!
//! This crate provides the question and category types, the `QuestionStore`
//! capability with in-memory and SQLite implementations, pagination, the
//! non-repeating quiz draw and the `QuestionService` that ties them together.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use trivia_core::{InMemoryQuestionStore, QuestionService};
//!
//! let store = InMemoryQuestionStore::new();
//! store.seed_categories(&trivia_core::types::DEFAULT_CATEGORIES).await;
//! let service = QuestionService::new(Arc::new(store));
//!
//! let page = service.get_questions(1).await?;
//! let draw = service.get_next_quiz_question(&[], &serde_json::json!(0)).await?;
//! ```

pub mod config;
pub mod error;
pub mod pagination;
pub mod quiz;
pub mod service;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{StoreProvider, TriviaConfig};
pub use error::{ErrorCode, ErrorKind, TriviaError, TriviaResult};
pub use pagination::{paginate, parse_page, QUESTIONS_PER_PAGE};
pub use service::{
    CategoryList, CategoryQuestions, CreateOutcome, DeleteOutcome, QuestionPage, QuestionService,
    QuizDraw, SearchResults,
};
pub use store::{InMemoryQuestionStore, SqliteQuestionStore};
pub use traits::QuestionStore;
pub use types::{
    Category, CategoryId, Question, QuestionDraft, QuestionId, QuizCategory, DEFAULT_CATEGORIES,
};
