//! checklist-server: multi-user todo lists over Postgres
//!
//! Persistence layer (`db`) plus the JSON HTTP API (`http`). Every
//! store operation is scoped to a username; cross-user access is
//! impossible by construction because the owner is part of every
//! query predicate.

pub mod db;
pub mod http;

pub use http::{run_server, ServerConfig};
