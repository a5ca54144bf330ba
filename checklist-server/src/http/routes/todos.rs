//! Todo endpoints, nested under their list.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;

use checklist_core::{Todo, TodoTitle};

use crate::db::{ListStore, StoreOutcome, TodoStore};
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;

#[derive(Deserialize)]
pub struct TodoTitleRequest {
    pub title: String,
}

/// GET /lists/{list_id}/todos - the list's todos in display order.
async fn index(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(list_id): Path<i32>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = TodoStore::new(&state.pool, &user).sorted(list_id).await?;

    if todos.is_empty() {
        // An empty result may be an empty list or a missing one.
        let exists = ListStore::new(&state.pool, &user)
            .load(list_id)
            .await?
            .is_some();
        if !exists {
            return Err(ApiError::NotFound { resource: "list" });
        }
    }

    Ok(Json(todos))
}

/// POST /lists/{list_id}/todos - append an undone todo.
async fn create(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(list_id): Path<i32>,
    Json(req): Json<TodoTitleRequest>,
) -> Result<StatusCode, ApiError> {
    let title = TodoTitle::new(&req.title)?;

    match TodoStore::new(&state.pool, &user)
        .create(list_id, &title)
        .await?
    {
        StoreOutcome::Applied => Ok(StatusCode::CREATED),
        _ => Err(ApiError::NotFound { resource: "list" }),
    }
}

/// POST /lists/{list_id}/todos/{todo_id}/toggle - flip done, return
/// the todo's new state.
async fn toggle(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((list_id, todo_id)): Path<(i32, i32)>,
) -> Result<Json<Todo>, ApiError> {
    let store = TodoStore::new(&state.pool, &user);

    match store.toggle_done(list_id, todo_id).await? {
        StoreOutcome::Applied => {}
        _ => return Err(ApiError::NotFound { resource: "todo" }),
    }

    // Re-read for the new state; the row can vanish under a concurrent
    // delete, which reads as not found.
    let todo = store
        .load(list_id, todo_id)
        .await?
        .ok_or(ApiError::NotFound { resource: "todo" })?;

    Ok(Json(todo))
}

/// DELETE /lists/{list_id}/todos/{todo_id}
async fn destroy(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path((list_id, todo_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    if TodoStore::new(&state.pool, &user)
        .delete(list_id, todo_id)
        .await?
        .applied()
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound { resource: "todo" })
    }
}

/// POST /lists/{list_id}/complete_all - mark every undone todo done.
///
/// 404 covers both a missing list and a list whose todos were already
/// all done; the store does not distinguish them.
async fn complete_all(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(list_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if TodoStore::new(&state.pool, &user)
        .complete_all(list_id)
        .await?
        .applied()
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound { resource: "list" })
    }
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lists/{list_id}/todos", get(index).post(create))
        .route("/lists/{list_id}/todos/{todo_id}", delete(destroy))
        .route("/lists/{list_id}/todos/{todo_id}/toggle", post(toggle))
        .route("/lists/{list_id}/complete_all", post(complete_all))
}
