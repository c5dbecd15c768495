//! Error types for trivia operations.
//!
//! Every failure the core reports carries a stable [`ErrorKind`] and a stable
//! user-facing message, plus a detail message for logs. The transport layer
//! decides the status code from the kind alone.

use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// Result type alias for trivia operations.
pub type TriviaResult<T> = Result<T, TriviaError>;

/// Main error type for all trivia operations.
#[derive(Error, Debug)]
pub enum TriviaError {
    /// A question, category or page does not exist.
    #[error("Not found: {message}")]
    NotFound { message: String, code: ErrorCode },

    /// The request was well-formed but the store rejected it.
    #[error("Unprocessable: {message}")]
    Unprocessable { message: String, code: ErrorCode },

    /// Malformed caller input.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        code: ErrorCode,
        field: Option<String>,
    },

    /// Database operation failed.
    #[error("Database error: {message}")]
    Database {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used by callers to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    Unprocessable,
    Validation,
    Internal,
}

impl ErrorKind {
    /// Stable message shown to API consumers.
    pub fn public_message(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "resource not found",
            ErrorKind::Unprocessable => "request cannot be processed",
            ErrorKind::Validation => "bad request",
            ErrorKind::Internal => "an internal server error occurred",
        }
    }
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lookup (TRV_0xx)
    QuestionNotFound,
    CategoryNotFound,
    PageNotFound,

    // Validation (VAL_xxx)
    ValMissingField,
    ValInvalidInput,
    ValUnknownCategory,

    // Store rejection (TRV_1xx)
    InsertRejected,
    DeleteRejected,

    // Database (DB_xxx)
    DbConnectionFailed,
    DbOperationFailed,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::QuestionNotFound => "TRV_001",
            ErrorCode::CategoryNotFound => "TRV_002",
            ErrorCode::PageNotFound => "TRV_003",
            ErrorCode::ValMissingField => "VAL_001",
            ErrorCode::ValInvalidInput => "VAL_002",
            ErrorCode::ValUnknownCategory => "VAL_003",
            ErrorCode::InsertRejected => "TRV_101",
            ErrorCode::DeleteRejected => "TRV_102",
            ErrorCode::DbConnectionFailed => "DB_001",
            ErrorCode::DbOperationFailed => "DB_002",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl TriviaError {
    /// Create a not found error for a question id.
    pub fn question_not_found(id: i64) -> Self {
        Self::NotFound {
            message: format!("Question with id '{}' not found", id),
            code: ErrorCode::QuestionNotFound,
        }
    }

    /// Create a not found error for a category id.
    pub fn category_not_found(id: i64) -> Self {
        Self::NotFound {
            message: format!("Category with id '{}' not found", id),
            code: ErrorCode::CategoryNotFound,
        }
    }

    /// Create a not found error for a page past the end of the listing.
    pub fn page_not_found(page: i64) -> Self {
        Self::NotFound {
            message: format!("Page {} is empty", page),
            code: ErrorCode::PageNotFound,
        }
    }

    /// Create a generic not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: ErrorCode::QuestionNotFound,
        }
    }

    /// Create an unprocessable error.
    pub fn unprocessable(message: impl Into<String>, code: ErrorCode) -> Self {
        Self::Unprocessable {
            message: message.into(),
            code,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            field: None,
        }
    }

    /// Create a validation error for a required field that was not supplied.
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::Validation {
            message: format!("Missing required field '{}'", field),
            code: ErrorCode::ValMissingField,
            field: Some(field),
        }
    }

    /// Create a validation error for a category reference that does not resolve.
    pub fn unknown_category(id: i64) -> Self {
        Self::Validation {
            message: format!("Category {} does not exist", id),
            code: ErrorCode::ValUnknownCategory,
            field: Some("category".to_string()),
        }
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            code: ErrorCode::DbOperationFailed,
            source: None,
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { code, .. } => *code,
            Self::Unprocessable { code, .. } => *code,
            Self::Validation { code, .. } => *code,
            Self::Database { code, .. } => *code,
            _ => ErrorCode::Internal,
        }
    }

    /// Get the stable error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unprocessable { .. } => ErrorKind::Unprocessable,
            Self::Validation { .. } => ErrorKind::Validation,
            _ => ErrorKind::Internal,
        }
    }

    /// Stable message for this error's kind.
    pub fn public_message(&self) -> &'static str {
        self.kind().public_message()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<rusqlite::Error> for TriviaError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            code: ErrorCode::DbOperationFailed,
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = TriviaError::question_not_found(42);
        assert_eq!(err.code(), ErrorCode::QuestionNotFound);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("42"));
        assert_eq!(err.public_message(), "resource not found");
    }

    #[test]
    fn test_missing_field_error() {
        let err = TriviaError::missing_field("answer");
        assert_eq!(err.code(), ErrorCode::ValMissingField);
        assert_eq!(err.kind(), ErrorKind::Validation);
        match err {
            TriviaError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("answer")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_database_errors_are_internal() {
        let err = TriviaError::database("disk full");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.code().as_str(), "DB_002");
    }

    #[test]
    fn test_error_kind_names() {
        assert_eq!(ErrorKind::NotFound.to_string(), "NOT_FOUND");
        let name: &'static str = ErrorKind::Unprocessable.into();
        assert_eq!(name, "UNPROCESSABLE");
    }
}
