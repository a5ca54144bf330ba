//! Todo store.
//!
//! Operations on individual todos, scoped to a (user, list) pair. Each
//! mutation is a single statement, so it is atomic without explicit
//! transactions.

use checklist_core::{Todo, TodoTitle};
use sqlx::PgPool;

use super::lists::TodoRow;
use super::{DbError, StoreOutcome};

/// Per-user store for todos within a list.
pub struct TodoStore<'a> {
    pool: &'a PgPool,
    username: &'a str,
}

impl<'a> TodoStore<'a> {
    pub fn new(pool: &'a PgPool, username: &'a str) -> Self {
        Self { pool, username }
    }

    /// Todos of one list in display order: undone first, then done,
    /// case-insensitive title within each group.
    pub async fn sorted(&self, list_id: i32) -> Result<Vec<Todo>, DbError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, done, todolist_id FROM todos \
             WHERE todolist_id = $1 AND username = $2 \
             ORDER BY done ASC, lower(title) ASC",
        )
        .bind(list_id)
        .bind(self.username)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    /// Load a single todo, or `None` if no match for this user.
    pub async fn load(&self, list_id: i32, todo_id: i32) -> Result<Option<Todo>, DbError> {
        let row = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, done, todolist_id FROM todos \
             WHERE todolist_id = $1 AND id = $2 AND username = $3",
        )
        .bind(list_id)
        .bind(todo_id)
        .bind(self.username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Todo::from))
    }

    /// Flip the done flag in one atomic update.
    pub async fn toggle_done(&self, list_id: i32, todo_id: i32) -> Result<StoreOutcome, DbError> {
        let result = sqlx::query(
            "UPDATE todos SET done = NOT done \
             WHERE todolist_id = $1 AND id = $2 AND username = $3",
        )
        .bind(list_id)
        .bind(todo_id)
        .bind(self.username)
        .execute(self.pool)
        .await?;

        if result.rows_affected() > 0 {
            Ok(StoreOutcome::Applied)
        } else {
            Ok(StoreOutcome::NotFound)
        }
    }

    /// Delete one todo.
    pub async fn delete(&self, list_id: i32, todo_id: i32) -> Result<StoreOutcome, DbError> {
        let result = sqlx::query(
            "DELETE FROM todos WHERE todolist_id = $1 AND id = $2 AND username = $3",
        )
        .bind(list_id)
        .bind(todo_id)
        .bind(self.username)
        .execute(self.pool)
        .await?;

        if result.rows_affected() > 0 {
            Ok(StoreOutcome::Applied)
        } else {
            Ok(StoreOutcome::NotFound)
        }
    }

    /// Mark every undone todo in the list done.
    ///
    /// `NotFound` means zero rows changed, which conflates "list does
    /// not exist" with "every todo was already done". The contract
    /// does not distinguish the two.
    pub async fn complete_all(&self, list_id: i32) -> Result<StoreOutcome, DbError> {
        let result = sqlx::query(
            "UPDATE todos SET done = TRUE \
             WHERE todolist_id = $1 AND username = $2 AND NOT done",
        )
        .bind(list_id)
        .bind(self.username)
        .execute(self.pool)
        .await?;

        if result.rows_affected() > 0 {
            Ok(StoreOutcome::Applied)
        } else {
            Ok(StoreOutcome::NotFound)
        }
    }

    /// Append a new undone todo to a list.
    ///
    /// The insert selects from todolists filtered on (id, owner), so
    /// it affects zero rows when the list does not belong to this
    /// user - that is the `NotFound` case.
    pub async fn create(&self, list_id: i32, title: &TodoTitle) -> Result<StoreOutcome, DbError> {
        let result = sqlx::query(
            "INSERT INTO todos (title, todolist_id, username) \
             SELECT $1, id, username FROM todolists \
             WHERE id = $2 AND username = $3",
        )
        .bind(title.as_str())
        .bind(list_id)
        .bind(self.username)
        .execute(self.pool)
        .await?;

        if result.rows_affected() > 0 {
            Ok(StoreOutcome::Applied)
        } else {
            Ok(StoreOutcome::NotFound)
        }
    }
}
