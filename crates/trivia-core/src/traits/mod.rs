//! Core traits for question bank providers.

mod question_store;

pub use question_store::*;
