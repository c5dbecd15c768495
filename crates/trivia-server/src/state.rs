//! Server state management.

use std::sync::Arc;

use trivia_core::QuestionService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<QuestionService>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(service: QuestionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> &QuestionService {
        &self.service
    }
}
