//! Question service - the operations the game client calls.
//!
//! Each operation validates its input, talks to the store, applies
//! pagination or a quiz draw and shapes the payload. Store failures are
//! passed through unchanged except where an operation converts them: insert
//! and delete failures become `Unprocessable`, and every quiz failure becomes
//! `NotFound`.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ErrorCode, TriviaError, TriviaResult};
use crate::pagination::{paginate, QUESTIONS_PER_PAGE};
use crate::quiz;
use crate::traits::QuestionStore;
use crate::types::{Category, CategoryId, Question, QuestionDraft, QuestionId, QuizCategory};

/// Label used for listings that span every category.
pub const ALL_CATEGORIES_LABEL: &str = "ALL";

/// Category names with their count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryList {
    pub categories: Vec<String>,
    pub total_categories: usize,
}

/// One page of the full question listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    /// Size of the whole listing, not of this page.
    pub total_questions: usize,
    pub current_category: String,
    pub categories: Vec<String>,
}

/// Every question matching a search term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

/// Questions of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOutcome {
    pub created: QuestionId,
    pub question: Question,
    pub total_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteOutcome {
    pub deleted: QuestionId,
    pub total_questions: usize,
}

/// Result of a quiz draw. `question` is `None` once the quiz is exhausted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizDraw {
    pub question: Option<Question>,
}

/// Orchestrates store access, pagination and quiz draws.
pub struct QuestionService {
    store: Arc<dyn QuestionStore>,
    page_size: usize,
    rng: Mutex<StdRng>,
}

impl QuestionService {
    /// Create a service over `store` with the default page size and an
    /// entropy-seeded random source.
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self {
            store,
            page_size: QUESTIONS_PER_PAGE,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Set the number of questions per listing page (minimum 1).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Use a deterministic random source for quiz draws.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn store(&self) -> &Arc<dyn QuestionStore> {
        &self.store
    }

    /// All category names, in id order. An empty store gives an empty list.
    pub async fn get_categories(&self) -> TriviaResult<CategoryList> {
        let categories = self.category_names().await?;
        Ok(CategoryList {
            total_categories: categories.len(),
            categories,
        })
    }

    /// Look up a single category.
    pub async fn get_category(&self, id: CategoryId) -> TriviaResult<Category> {
        self.store
            .get_category(id)
            .await?
            .ok_or_else(|| TriviaError::category_not_found(id))
    }

    /// One page of all questions. An empty page is `NotFound`.
    pub async fn get_questions(&self, page: i64) -> TriviaResult<QuestionPage> {
        let all = self.store.list_all().await?;
        let questions = paginate(&all, page, self.page_size);
        if questions.is_empty() {
            return Err(TriviaError::page_not_found(page));
        }

        Ok(QuestionPage {
            questions,
            total_questions: all.len(),
            current_category: ALL_CATEGORIES_LABEL.to_string(),
            categories: self.category_names().await?,
        })
    }

    /// Delete a question by id.
    pub async fn delete_question(&self, id: QuestionId) -> TriviaResult<DeleteOutcome> {
        match self.store.delete_by_id(id).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => return Err(e),
            Err(e) => {
                warn!(question_id = id, error = %e, "Delete rejected by store");
                return Err(TriviaError::unprocessable(
                    format!("Could not delete question {}: {}", id, e),
                    ErrorCode::DeleteRejected,
                ));
            }
        }

        let total_questions = self.store.count().await.map_err(|e| {
            TriviaError::unprocessable(
                format!("Question {} deleted but count failed: {}", id, e),
                ErrorCode::DeleteRejected,
            )
        })?;
        debug!(question_id = id, total_questions, "Deleted question");

        Ok(DeleteOutcome {
            deleted: id,
            total_questions,
        })
    }

    /// Create a question. Any store rejection is `Unprocessable`.
    pub async fn create_question(&self, draft: QuestionDraft) -> TriviaResult<CreateOutcome> {
        let question = self.store.insert(draft).await.map_err(|e| {
            warn!(error = %e, "Insert rejected by store");
            TriviaError::unprocessable(
                format!("Could not create question: {}", e),
                ErrorCode::InsertRejected,
            )
        })?;

        let total_questions = self.store.count().await.map_err(|e| {
            TriviaError::unprocessable(
                format!("Question {} created but count failed: {}", question.id, e),
                ErrorCode::InsertRejected,
            )
        })?;
        debug!(question_id = question.id, total_questions, "Created question");

        Ok(CreateOutcome {
            created: question.id,
            question,
            total_questions,
        })
    }

    /// Every question whose text contains `term`, ignoring case.
    ///
    /// Results are not paginated, and zero matches is a success. A missing
    /// term is a validation error.
    pub async fn search_questions(&self, term: Option<&str>) -> TriviaResult<SearchResults> {
        let term = term.ok_or_else(|| TriviaError::missing_field("searchTerm"))?;
        let questions = self.store.find_by_substring(term).await?;
        debug!(term, matches = questions.len(), "Searched questions");

        Ok(SearchResults {
            total_questions: questions.len(),
            questions,
            current_category: ALL_CATEGORIES_LABEL.to_string(),
        })
    }

    /// Questions of an existing category; an empty result is valid.
    pub async fn get_questions_by_category(
        &self,
        category_id: CategoryId,
    ) -> TriviaResult<CategoryQuestions> {
        let category = self.get_category(category_id).await?;
        let questions = self.store.find_by_category(category_id).await?;

        Ok(CategoryQuestions {
            total_questions: questions.len(),
            questions,
            current_category: category,
        })
    }

    /// Draw the next quiz question.
    ///
    /// `quiz_category` is the raw payload (`0`, `{"id": 0}`, `{"id": 3, ...}`).
    /// Any failure, including a malformed payload, is reported as `NotFound`.
    pub async fn get_next_quiz_question(
        &self,
        previous_ids: &[QuestionId],
        quiz_category: &Value,
    ) -> TriviaResult<QuizDraw> {
        self.draw(previous_ids, quiz_category).await.map_err(|e| {
            warn!(error = %e, "Quiz draw failed");
            TriviaError::not_found(format!("Quiz draw failed: {}", e))
        })
    }

    async fn draw(
        &self,
        previous_ids: &[QuestionId],
        quiz_category: &Value,
    ) -> TriviaResult<QuizDraw> {
        let category = QuizCategory::from_payload(quiz_category)?;
        let pool = match category {
            QuizCategory::All => self.store.list_all().await?,
            QuizCategory::Specific(id) => self.store.find_by_category(id).await?,
        };
        let previous: HashSet<QuestionId> = previous_ids.iter().copied().collect();

        let question = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| TriviaError::Internal("quiz rng lock poisoned".to_string()))?;
            quiz::next_question(&pool, category, &previous, &mut *rng)
        };

        match &question {
            Some(q) => debug!(question_id = q.id, ?category, "Drew quiz question"),
            None => debug!(?category, seen = previous.len(), "Quiz exhausted"),
        }
        Ok(QuizDraw { question })
    }

    async fn category_names(&self) -> TriviaResult<Vec<String>> {
        Ok(self
            .store
            .list_categories()
            .await?
            .into_iter()
            .map(|c| c.kind)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::InMemoryQuestionStore;
    use crate::traits::MockQuestionStore;
    use serde_json::json;

    fn service_with(questions: Vec<Question>) -> QuestionService {
        let store = InMemoryQuestionStore::with_data(
            vec![Category::new(1, "Science"), Category::new(2, "Sports")],
            questions,
        );
        QuestionService::new(Arc::new(store)).with_rng_seed(7)
    }

    fn numbered(n: i64) -> Vec<Question> {
        (1..=n)
            .map(|i| Question::new(i, format!("Question {i}"), "answer", 1 + i % 2, 1))
            .collect()
    }

    #[tokio::test]
    async fn test_get_questions_pages() {
        let service = service_with(numbered(23));

        let first = service.get_questions(1).await.unwrap();
        assert_eq!(first.questions.len(), 10);
        assert_eq!(first.total_questions, 23);
        assert_eq!(first.current_category, "ALL");
        assert_eq!(first.categories, vec!["Science", "Sports"]);

        let third = service.get_questions(3).await.unwrap();
        let ids: Vec<_> = third.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![21, 22, 23]);

        let err = service.get_questions(4).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_custom_page_size() {
        let service = service_with(numbered(5)).with_page_size(2);
        assert_eq!(service.get_questions(3).await.unwrap().questions.len(), 1);
        assert!(service.get_questions(4).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_store_listing_is_not_found_but_categories_succeed() {
        let service = QuestionService::new(Arc::new(InMemoryQuestionStore::new()));
        assert!(service.get_questions(1).await.unwrap_err().is_not_found());

        let categories = service.get_categories().await.unwrap();
        assert!(categories.categories.is_empty());
        assert_eq!(categories.total_categories, 0);
    }

    #[tokio::test]
    async fn test_search_requires_term() {
        let service = service_with(numbered(3));
        let err = service.search_questions(None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_search_returns_all_matches_unpaginated() {
        let service = service_with(numbered(25));
        let results = service.search_questions(Some("QUESTION")).await.unwrap();
        assert_eq!(results.total_questions, 25);
        assert_eq!(results.questions.len(), 25);
    }

    #[tokio::test]
    async fn test_delete_decrements_count() {
        let service = service_with(numbered(3));
        let outcome = service.delete_question(2).await.unwrap();
        assert_eq!(outcome, DeleteOutcome { deleted: 2, total_questions: 2 });

        let err = service.delete_question(2).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_create_question_failures_are_unprocessable() {
        let service = service_with(Vec::new());

        let err = service
            .create_question(QuestionDraft::new("Q", "A", 42, 1))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unprocessable);
        assert_eq!(err.code(), ErrorCode::InsertRejected);

        let err = service
            .create_question(QuestionDraft::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unprocessable);

        let created = service
            .create_question(QuestionDraft::new("Q", "A", 2, 4))
            .await
            .unwrap();
        assert_eq!(created.created, 1);
        assert_eq!(created.total_questions, 1);
        assert_eq!(created.question.difficulty, 4);
    }

    #[tokio::test]
    async fn test_delete_store_failure_is_unprocessable() {
        let mut store = MockQuestionStore::new();
        store
            .expect_delete_by_id()
            .returning(|_| Err(TriviaError::database("database is locked")));
        let service = QuestionService::new(Arc::new(store));

        let err = service.delete_question(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unprocessable);
        assert_eq!(err.code(), ErrorCode::DeleteRejected);
    }

    #[tokio::test]
    async fn test_listing_store_failure_propagates() {
        let mut store = MockQuestionStore::new();
        store
            .expect_list_all()
            .returning(|| Err(TriviaError::database("no such table: questions")));
        let service = QuestionService::new(Arc::new(store));

        let err = service.get_questions(1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_quiz_store_failure_is_not_found() {
        let mut store = MockQuestionStore::new();
        store
            .expect_find_by_category()
            .returning(|_| Err(TriviaError::database("disk I/O error")));
        let service = QuestionService::new(Arc::new(store));

        let err = service
            .get_next_quiz_question(&[], &json!({"id": 1}))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_quiz_malformed_category_is_not_found() {
        let service = service_with(numbered(3));
        let err = service
            .get_next_quiz_question(&[], &json!({"type": "Science"}))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_quiz_all_excludes_previous() {
        let service = service_with(numbered(4));
        let draw = service
            .get_next_quiz_question(&[1, 2, 4], &json!(0))
            .await
            .unwrap();
        assert_eq!(draw.question.map(|q| q.id), Some(3));

        let draw = service
            .get_next_quiz_question(&[1, 2, 3, 4], &json!({"id": 0}))
            .await
            .unwrap();
        assert_eq!(draw.question, None);
    }

    #[tokio::test]
    async fn test_category_lookup_uses_id_as_given() {
        let service = service_with(numbered(4));
        let result = service.get_questions_by_category(1).await.unwrap();
        assert_eq!(result.current_category, Category::new(1, "Science"));
        assert!(result.questions.iter().all(|q| q.category == 1));

        let err = service.get_questions_by_category(3).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
