//! Quiz category filter.

use serde_json::Value;

use super::category::CategoryId;
use crate::error::{TriviaError, TriviaResult};

/// Id the game client uses to mean "every category".
pub const ALL_CATEGORIES_ID: CategoryId = 0;

/// Which questions a quiz draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
    /// Every question in the bank.
    All,
    /// Only questions of this category.
    Specific(CategoryId),
}

impl QuizCategory {
    pub fn from_id(id: CategoryId) -> Self {
        if id == ALL_CATEGORIES_ID {
            QuizCategory::All
        } else {
            QuizCategory::Specific(id)
        }
    }

    /// Normalize the `quiz_category` payload.
    ///
    /// Accepted shapes: a bare number, a numeric string, or an object whose
    /// `id` field is one of those. `0` selects every category.
    pub fn from_payload(payload: &Value) -> TriviaResult<Self> {
        match payload {
            Value::Object(map) => map
                .get("id")
                .ok_or_else(|| TriviaError::validation("quiz_category has no 'id' field"))
                .and_then(id_from_value)
                .map(Self::from_id),
            other => id_from_value(other).map(Self::from_id),
        }
    }

    pub fn matches(&self, category: CategoryId) -> bool {
        match self {
            QuizCategory::All => true,
            QuizCategory::Specific(id) => *id == category,
        }
    }
}

fn id_from_value(value: &Value) -> TriviaResult<CategoryId> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| TriviaError::validation(format!("Invalid category id {}", n))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| TriviaError::validation(format!("Invalid category id '{}'", s))),
        other => Err(TriviaError::validation(format!(
            "Unsupported quiz_category payload: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_zero_means_all() {
        assert_eq!(QuizCategory::from_payload(&json!(0)).unwrap(), QuizCategory::All);
    }

    #[test]
    fn test_object_payloads() {
        assert_eq!(
            QuizCategory::from_payload(&json!({"id": 0, "type": "click"})).unwrap(),
            QuizCategory::All
        );
        assert_eq!(
            QuizCategory::from_payload(&json!({"id": 3, "type": "Geography"})).unwrap(),
            QuizCategory::Specific(3)
        );
        assert_eq!(
            QuizCategory::from_payload(&json!({"id": "2"})).unwrap(),
            QuizCategory::Specific(2)
        );
    }

    #[test]
    fn test_bare_number_is_specific() {
        assert_eq!(QuizCategory::from_payload(&json!(4)).unwrap(), QuizCategory::Specific(4));
    }

    #[test]
    fn test_malformed_payloads() {
        assert!(QuizCategory::from_payload(&json!(null)).is_err());
        assert!(QuizCategory::from_payload(&json!({"type": "Science"})).is_err());
        assert!(QuizCategory::from_payload(&json!({"id": "science"})).is_err());
        assert!(QuizCategory::from_payload(&json!([1])).is_err());
        assert!(QuizCategory::from_payload(&json!(1.5)).is_err());
    }

    #[test]
    fn test_matches() {
        assert!(QuizCategory::All.matches(7));
        assert!(QuizCategory::Specific(2).matches(2));
        assert!(!QuizCategory::Specific(2).matches(1));
    }
}
