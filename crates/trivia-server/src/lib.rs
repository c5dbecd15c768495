//! trivia-server - REST API server for the trivia question bank.
//!
//! Exposes categories, paginated question listings, search, creation,
//! deletion and quiz draws over JSON.
//!
//! # Example
//!
//! ```ignore
//! use trivia_core::TriviaConfig;
//! use trivia_server::{create_server, factory, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TriviaConfig::builder().in_memory().build();
//!     let service = factory::create_service(&config).await?;
//!     let app = create_server(AppState::new(service));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod factory;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use factory::{create_service, create_store};
pub use state::AppState;

use axum::{middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
