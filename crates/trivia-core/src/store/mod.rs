//! Question store implementations.

mod memory;
mod sqlite;

pub use memory::InMemoryQuestionStore;
pub use sqlite::SqliteQuestionStore;
