//! Todo-list endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use checklist_core::{sort, ListTitle, Todo, TodoList};

use crate::db::{ListStore, StoreOutcome};
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;

#[derive(Deserialize)]
pub struct ListTitleRequest {
    pub title: String,
}

/// One entry in the lists overview, with summary counts.
#[derive(Serialize)]
pub struct ListSummary {
    pub id: i32,
    pub title: String,
    pub todos_total: usize,
    pub todos_done: usize,
    pub complete: bool,
    pub todos: Vec<Todo>,
}

impl From<TodoList> for ListSummary {
    fn from(list: TodoList) -> Self {
        Self {
            id: list.id,
            title: list.title.clone(),
            todos_total: list.todos.len(),
            todos_done: list.done_count(),
            complete: list.is_complete(),
            todos: list.todos,
        }
    }
}

/// A single list with sorter-ordered todos and its derived predicates.
#[derive(Serialize)]
pub struct ListDetail {
    pub id: i32,
    pub title: String,
    pub complete: bool,
    pub has_incomplete: bool,
    pub todos: Vec<Todo>,
}

impl From<TodoList> for ListDetail {
    fn from(list: TodoList) -> Self {
        Self {
            id: list.id,
            title: list.title.clone(),
            complete: list.is_complete(),
            has_incomplete: list.has_incomplete(),
            todos: list.todos,
        }
    }
}

/// GET /lists - every list for the signed-in user, display-ordered.
async fn index(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<ListSummary>>, ApiError> {
    let lists = ListStore::new(&state.pool, &user).sorted().await?;
    Ok(Json(lists.into_iter().map(ListSummary::from).collect()))
}

/// POST /lists - create an empty list.
///
/// The existence pre-check gives the common duplicate a fast rejection;
/// the constraint-backed Conflict from create() catches the race the
/// pre-check cannot.
async fn create(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ListTitleRequest>,
) -> Result<StatusCode, ApiError> {
    let title = ListTitle::new(&req.title)?;
    let store = ListStore::new(&state.pool, &user);

    if store.exists_title(title.as_str()).await? {
        return Err(ApiError::Conflict {
            message: "list title must be unique",
        });
    }

    match store.create(&title).await? {
        StoreOutcome::Applied => Ok(StatusCode::CREATED),
        _ => Err(ApiError::Conflict {
            message: "list title must be unique",
        }),
    }
}

/// GET /lists/{list_id} - one list, todos in display order.
async fn show(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(list_id): Path<i32>,
) -> Result<Json<ListDetail>, ApiError> {
    let mut list = ListStore::new(&state.pool, &user)
        .load(list_id)
        .await?
        .ok_or(ApiError::NotFound { resource: "list" })?;

    list.todos = sort::sorted(std::mem::take(&mut list.todos));
    Ok(Json(ListDetail::from(list)))
}

/// PUT /lists/{list_id} - rename.
async fn rename(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(list_id): Path<i32>,
    Json(req): Json<ListTitleRequest>,
) -> Result<StatusCode, ApiError> {
    let title = ListTitle::new(&req.title)?;
    let store = ListStore::new(&state.pool, &user);

    if store.exists_title(title.as_str()).await? {
        return Err(ApiError::Conflict {
            message: "list title must be unique",
        });
    }

    match store.rename(list_id, &title).await? {
        StoreOutcome::Applied => Ok(StatusCode::OK),
        StoreOutcome::NotFound => Err(ApiError::NotFound { resource: "list" }),
        StoreOutcome::Conflict => Err(ApiError::Conflict {
            message: "list title must be unique",
        }),
    }
}

/// DELETE /lists/{list_id} - remove the list and, via cascade, its todos.
async fn destroy(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(list_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if ListStore::new(&state.pool, &user)
        .delete(list_id)
        .await?
        .applied()
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound { resource: "list" })
    }
}

/// List routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lists", get(index).post(create))
        .route("/lists/{list_id}", get(show).put(rename).delete(destroy))
}
