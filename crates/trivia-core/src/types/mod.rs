//! Core types for the question bank.

mod category;
mod question;
mod quiz;

pub use category::*;
pub use question::*;
pub use quiz::*;
