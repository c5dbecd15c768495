//! Build the store and service from configuration.

use std::sync::Arc;

use tracing::info;
use trivia_core::config::{StoreProvider, TriviaConfig};
use trivia_core::error::TriviaResult;
use trivia_core::{
    InMemoryQuestionStore, QuestionService, QuestionStore, SqliteQuestionStore,
    DEFAULT_CATEGORIES,
};

/// Create the configured store, seeding default categories if it has none.
pub async fn create_store(config: &TriviaConfig) -> TriviaResult<Arc<dyn QuestionStore>> {
    let seed = config.store.seed_default_categories;

    let store: Arc<dyn QuestionStore> = match config.store.provider {
        StoreProvider::Sqlite => {
            info!(path = %config.store.path.display(), "Opening SQLite question store");
            let store = SqliteQuestionStore::open(&config.store.path)?;
            if seed && store.list_categories().await?.is_empty() {
                let created = store.seed_categories(&DEFAULT_CATEGORIES)?;
                info!(count = created.len(), "Seeded default categories");
            }
            Arc::new(store)
        }
        StoreProvider::Memory => {
            info!("Using in-memory question store");
            let store = InMemoryQuestionStore::new();
            if seed {
                let created = store.seed_categories(&DEFAULT_CATEGORIES).await;
                info!(count = created.len(), "Seeded default categories");
            }
            Arc::new(store)
        }
    };

    Ok(store)
}

/// Create the question service for a configuration.
pub async fn create_service(config: &TriviaConfig) -> TriviaResult<QuestionService> {
    let store = create_store(config).await?;
    let service = QuestionService::new(store).with_page_size(config.page_size);

    Ok(match config.quiz_seed {
        Some(seed) => service.with_rng_seed(seed),
        None => service,
    })
}
