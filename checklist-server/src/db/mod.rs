//! Database layer - connection pool, schema, and per-user stores
//!
//! # Design principles
//!
//! - Every query filters on the owning username; there is no separate
//!   ownership probe
//! - Single-statement operations only, no multi-statement transactions
//! - Title uniqueness is enforced by the UNIQUE constraint; the
//!   pre-insert existence check is a UX shortcut, not the guarantee

pub mod auth;
pub mod lists;
pub mod migrations;
pub mod pool;
pub mod todos;

pub use auth::AuthStore;
pub use lists::ListStore;
pub use pool::create_pool;
pub use todos::TodoStore;

use thiserror::Error;

/// Fatal store failure. Expected outcomes (not found, duplicate title)
/// travel as [`StoreOutcome`] values instead.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Expected outcome of a mutating store operation.
///
/// The `Result` error channel is reserved for unexpected store
/// failures; everything a caller is supposed to handle arrives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The statement changed at least one row.
    Applied,
    /// No row matched the (id, owner) predicate.
    NotFound,
    /// Rejected by the per-owner title uniqueness constraint.
    Conflict,
}

impl StoreOutcome {
    pub fn applied(self) -> bool {
        matches!(self, StoreOutcome::Applied)
    }
}

/// Recognize a Postgres unique-constraint violation.
///
/// The only store error this layer ever translates; anything else
/// propagates to the caller unchanged. A duplicate title is terminal
/// for that title - retrying the same insert will fail again.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applied_predicate() {
        assert!(StoreOutcome::Applied.applied());
        assert!(!StoreOutcome::NotFound.applied());
        assert!(!StoreOutcome::Conflict.applied());
    }

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation(&sqlx::Error::PoolClosed));
    }
}
