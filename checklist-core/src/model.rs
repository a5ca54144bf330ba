//! Todo and todo-list records as the rest of the system sees them.
//!
//! The owning username is a scoping parameter threaded through the
//! persistence layer, never stored on these types.

use serde::Serialize;

/// A single task item belonging to exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub done: bool,
}

/// A named collection of todos with its items attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoList {
    pub id: i32,
    pub title: String,
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// A list is complete when it has at least one todo and every todo
    /// is done. An empty list is never complete.
    pub fn is_complete(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|todo| todo.done)
    }

    /// At least one todo is still undone.
    pub fn has_incomplete(&self) -> bool {
        self.todos.iter().any(|todo| !todo.done)
    }

    /// Number of todos already marked done.
    pub fn done_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.done).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: i32, title: &str, done: bool) -> Todo {
        Todo {
            id,
            title: title.to_owned(),
            done,
        }
    }

    fn list(todos: Vec<Todo>) -> TodoList {
        TodoList {
            id: 1,
            title: "Groceries".to_owned(),
            todos,
        }
    }

    #[test]
    fn empty_list_is_never_complete() {
        let list = list(vec![]);
        assert!(!list.is_complete());
        assert!(!list.has_incomplete());
    }

    #[test]
    fn list_with_only_done_todos_is_complete() {
        let list = list(vec![todo(1, "Milk", true), todo(2, "Bread", true)]);
        assert!(list.is_complete());
        assert!(!list.has_incomplete());
    }

    #[test]
    fn one_undone_todo_keeps_list_incomplete() {
        let list = list(vec![todo(1, "Milk", false), todo(2, "Bread", true)]);
        assert!(!list.is_complete());
        assert!(list.has_incomplete());
        assert_eq!(list.done_count(), 1);
    }
}
