//! Question store trait.

use async_trait::async_trait;

use crate::error::TriviaResult;
use crate::types::{Category, CategoryId, Question, QuestionDraft, QuestionId};

/// Persistence capability for questions and categories.
///
/// The store is the system of record: it serializes its own mutations and
/// enforces that new questions reference an existing category.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// All questions ordered by id ascending.
    async fn list_all(&self) -> TriviaResult<Vec<Question>>;

    /// All categories ordered by id ascending.
    async fn list_categories(&self) -> TriviaResult<Vec<Category>>;

    /// Look up a single category.
    async fn get_category(&self, id: CategoryId) -> TriviaResult<Option<Category>>;

    /// Questions of one category, ordered by id ascending.
    async fn find_by_category(&self, category_id: CategoryId) -> TriviaResult<Vec<Question>>;

    /// Questions whose text contains `term`, ignoring case, ordered by id.
    async fn find_by_substring(&self, term: &str) -> TriviaResult<Vec<Question>>;

    /// Validate and persist a new question.
    ///
    /// Fails with a validation error when a field is missing or the category
    /// does not exist.
    async fn insert(&self, draft: QuestionDraft) -> TriviaResult<Question>;

    /// Remove a question. Fails with not found if the id is unknown.
    async fn delete_by_id(&self, id: QuestionId) -> TriviaResult<()>;

    /// Number of stored questions.
    async fn count(&self) -> TriviaResult<usize>;
}
