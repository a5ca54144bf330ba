//! checklist-core: domain layer for the checklist todo service
//!
//! Pure types and ordering rules. No database, HTTP, or runtime
//! concerns - those live in checklist-server.

pub mod model;
pub mod sort;
pub mod title;

pub use model::{Todo, TodoList};
pub use title::{ListTitle, TodoTitle, ValidationError};
