//! Question types.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::category::CategoryId;
use crate::error::{TriviaError, TriviaResult};

/// Identifier assigned to a question by the store.
pub type QuestionId = i64;

/// A stored trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier, assigned at creation.
    pub id: QuestionId,
    /// The question text.
    pub question: String,
    /// The expected answer.
    pub answer: String,
    /// Owning category.
    pub category: CategoryId,
    /// Difficulty score, 1 or higher.
    pub difficulty: u32,
}

impl Question {
    /// Create a question with all fields given.
    pub fn new(
        id: QuestionId,
        question: impl Into<String>,
        answer: impl Into<String>,
        category: CategoryId,
        difficulty: u32,
    ) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
            category,
            difficulty,
        }
    }

    /// Whether the question text contains `term`, ignoring case.
    pub fn matches(&self, term: &str) -> bool {
        self.question.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Creation payload as received from a caller.
///
/// Nothing is validated at deserialization time; the store calls
/// [`QuestionDraft::validate`] on insert. Numeric fields accept numbers or
/// numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub difficulty: Option<i64>,
}

/// A draft that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: u32,
}

impl NewQuestion {
    /// Attach the identifier assigned by the store.
    pub fn with_id(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

impl QuestionDraft {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: CategoryId,
        difficulty: i64,
    ) -> Self {
        Self {
            question: Some(question.into()),
            answer: Some(answer.into()),
            category: Some(category),
            difficulty: Some(difficulty),
        }
    }

    /// Check that every required field is present and well-formed.
    ///
    /// Category existence is not checked here; that needs the store.
    pub fn validate(&self) -> TriviaResult<NewQuestion> {
        let question = required_text(&self.question, "question")?;
        let answer = required_text(&self.answer, "answer")?;
        let category = self
            .category
            .ok_or_else(|| TriviaError::missing_field("category"))?;
        let difficulty = self
            .difficulty
            .ok_or_else(|| TriviaError::missing_field("difficulty"))?;

        let difficulty = u32::try_from(difficulty)
            .ok()
            .filter(|d| *d >= 1)
            .ok_or_else(|| {
                TriviaError::validation(format!("Difficulty must be positive, got {}", difficulty))
            })?;

        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

fn required_text(value: &Option<String>, field: &str) -> TriviaResult<String> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(TriviaError::missing_field(field)),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

/// Accept `5`, `"5"` or `null`.
pub(crate) fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected an integer, got '{}'", s))),
    }
}
