//! Todo-list store.
//!
//! All operations are scoped to the username supplied at construction;
//! the owner is part of every query predicate, so a list id belonging
//! to another user simply never matches.

use checklist_core::{sort, ListTitle, Todo, TodoList};
use sqlx::{FromRow, PgPool};

use super::{is_unique_violation, DbError, StoreOutcome};

#[derive(Debug, Clone, FromRow)]
struct ListRow {
    id: i32,
    title: String,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct TodoRow {
    pub id: i32,
    pub title: String,
    pub done: bool,
    pub todolist_id: i32,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            title: row.title,
            done: row.done,
        }
    }
}

/// Per-user store for todo lists.
pub struct ListStore<'a> {
    pool: &'a PgPool,
    username: &'a str,
}

impl<'a> ListStore<'a> {
    pub fn new(pool: &'a PgPool, username: &'a str) -> Self {
        Self { pool, username }
    }

    /// All lists for this user with their todos attached, ordered for
    /// display: incomplete lists first, then complete ones, each group
    /// title-sorted.
    ///
    /// The two reads are independent statements, not a snapshot; a
    /// concurrent write can show up in one result and not the other.
    pub async fn sorted(&self) -> Result<Vec<TodoList>, DbError> {
        let lists = sqlx::query_as::<_, ListRow>(
            "SELECT id, title FROM todolists WHERE username = $1 ORDER BY lower(title) ASC",
        )
        .bind(self.username)
        .fetch_all(self.pool);

        let todos = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, done, todolist_id FROM todos WHERE username = $1",
        )
        .bind(self.username)
        .fetch_all(self.pool);

        let (lists, todos) = tokio::try_join!(lists, todos)?;

        let lists = lists
            .into_iter()
            .map(|row| TodoList {
                id: row.id,
                title: row.title,
                todos: todos
                    .iter()
                    .filter(|todo| todo.todolist_id == row.id)
                    .cloned()
                    .map(Todo::from)
                    .collect(),
            })
            .collect();

        Ok(sort::sorted(lists))
    }

    /// Load one list with its todos attached (unsorted), or `None` if
    /// no list with that id exists for this user.
    ///
    /// Same non-snapshot caveat as [`sorted`](Self::sorted).
    pub async fn load(&self, list_id: i32) -> Result<Option<TodoList>, DbError> {
        let list = sqlx::query_as::<_, ListRow>(
            "SELECT id, title FROM todolists WHERE id = $1 AND username = $2",
        )
        .bind(list_id)
        .bind(self.username)
        .fetch_optional(self.pool);

        let todos = sqlx::query_as::<_, TodoRow>(
            "SELECT id, title, done, todolist_id FROM todos \
             WHERE todolist_id = $1 AND username = $2",
        )
        .bind(list_id)
        .bind(self.username)
        .fetch_all(self.pool);

        let (list, todos) = tokio::try_join!(list, todos)?;

        Ok(list.map(|row| TodoList {
            id: row.id,
            title: row.title,
            todos: todos.into_iter().map(Todo::from).collect(),
        }))
    }

    /// Create an empty list. `Conflict` when the title already exists
    /// for this user; the constraint is the source of truth even if
    /// the caller pre-checked with [`exists_title`](Self::exists_title).
    pub async fn create(&self, title: &ListTitle) -> Result<StoreOutcome, DbError> {
        let result = sqlx::query("INSERT INTO todolists (title, username) VALUES ($1, $2)")
            .bind(title.as_str())
            .bind(self.username)
            .execute(self.pool)
            .await;

        match result {
            Ok(_) => Ok(StoreOutcome::Applied),
            Err(err) if is_unique_violation(&err) => Ok(StoreOutcome::Conflict),
            Err(err) => Err(err.into()),
        }
    }

    /// Rename a list. `NotFound` when no list with that id exists for
    /// this user, `Conflict` when the new title collides.
    pub async fn rename(&self, list_id: i32, title: &ListTitle) -> Result<StoreOutcome, DbError> {
        let result = sqlx::query("UPDATE todolists SET title = $1 WHERE id = $2 AND username = $3")
            .bind(title.as_str())
            .bind(list_id)
            .bind(self.username)
            .execute(self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() > 0 => Ok(StoreOutcome::Applied),
            Ok(_) => Ok(StoreOutcome::NotFound),
            Err(err) if is_unique_violation(&err) => Ok(StoreOutcome::Conflict),
            Err(err) => Err(err.into()),
        }
    }

    /// Delete a list; its todos go with it via the cascade.
    pub async fn delete(&self, list_id: i32) -> Result<StoreOutcome, DbError> {
        let result = sqlx::query("DELETE FROM todolists WHERE id = $1 AND username = $2")
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

    /// Whether a list with this title already exists for this user.
    ///
    /// UX pre-check only: a concurrent create can still race between
    /// this check and the insert, which surfaces as `Conflict` there.
    pub async fn exists_title(&self, title: &str) -> Result<bool, DbError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM todolists WHERE title = $1 AND username = $2)",
        )
        .bind(title)
        .bind(self.username)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    // Store behavior is covered by the integration tests in
    // tests/store.rs (requires DATABASE_URL); the pure joining and
    // ordering logic lives in checklist-core and is tested there.
}
