//! In-memory question store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{TriviaError, TriviaResult};
use crate::traits::QuestionStore;
use crate::types::{Category, CategoryId, Question, QuestionDraft, QuestionId};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<CategoryId, Category>,
    questions: BTreeMap<QuestionId, Question>,
    next_question_id: QuestionId,
}

/// Question store backed by ordered maps, for tests and ephemeral runs.
///
/// Ids are assigned monotonically and never reused after deletion.
pub struct InMemoryQuestionStore {
    tables: RwLock<Tables>,
}

impl InMemoryQuestionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                next_question_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Create a store pre-populated with categories and questions.
    ///
    /// Question ids are kept as given; later inserts continue after the
    /// highest one.
    pub fn with_data(categories: Vec<Category>, questions: Vec<Question>) -> Self {
        let next_question_id = questions.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        Self {
            tables: RwLock::new(Tables {
                categories: categories.into_iter().map(|c| (c.id, c)).collect(),
                questions: questions.into_iter().map(|q| (q.id, q)).collect(),
                next_question_id,
            }),
        }
    }

    /// Add categories named in order, with ids continuing after the highest
    /// existing one. Returns the categories created.
    pub async fn seed_categories(&self, names: &[&str]) -> Vec<Category> {
        let mut tables = self.tables.write().await;
        let mut next_id = tables.categories.keys().max().copied().unwrap_or(0) + 1;
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            let category = Category::new(next_id, *name);
            tables.categories.insert(next_id, category.clone());
            created.push(category);
            next_id += 1;
        }
        created
    }
}

impl Default for InMemoryQuestionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn list_all(&self) -> TriviaResult<Vec<Question>> {
        Ok(self.tables.read().await.questions.values().cloned().collect())
    }

    async fn list_categories(&self) -> TriviaResult<Vec<Category>> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: CategoryId) -> TriviaResult<Option<Category>> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn find_by_category(&self, category_id: CategoryId) -> TriviaResult<Vec<Question>> {
        Ok(self
            .tables
            .read()
            .await
            .questions
            .values()
            .filter(|q| q.category == category_id)
            .cloned()
            .collect())
    }

    async fn find_by_substring(&self, term: &str) -> TriviaResult<Vec<Question>> {
        Ok(self
            .tables
            .read()
            .await
            .questions
            .values()
            .filter(|q| q.matches(term))
            .cloned()
            .collect())
    }

    async fn insert(&self, draft: QuestionDraft) -> TriviaResult<Question> {
        let new = draft.validate()?;
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&new.category) {
            return Err(TriviaError::unknown_category(new.category));
        }

        let id = tables.next_question_id;
        tables.next_question_id += 1;
        let question = new.with_id(id);
        tables.questions.insert(id, question.clone());
        debug!(question_id = id, "Inserted question");
        Ok(question)
    }

    async fn delete_by_id(&self, id: QuestionId) -> TriviaResult<()> {
        match self.tables.write().await.questions.remove(&id) {
            Some(_) => Ok(()),
            None => Err(TriviaError::question_not_found(id)),
        }
    }

    async fn count(&self) -> TriviaResult<usize> {
        Ok(self.tables.read().await.questions.len())
    }
}
