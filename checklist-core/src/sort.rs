//! Display ordering for todos and lists.
//!
//! Both kinds of collection use the same rule: unfinished items first,
//! then finished ones, each group ordered by case-insensitive title.
//! For todos "finished" is the raw `done` flag; for lists it is the
//! list-level completion predicate.

use std::cmp::Ordering;

use crate::model::{Todo, TodoList};

/// Items the display-ordering rule applies to.
pub trait SortItem {
    fn title(&self) -> &str;

    /// Whether the item sorts into the trailing, finished group.
    fn finished(&self) -> bool;
}

impl SortItem for Todo {
    fn title(&self) -> &str {
        &self.title
    }

    fn finished(&self) -> bool {
        self.done
    }
}

impl SortItem for TodoList {
    fn title(&self) -> &str {
        &self.title
    }

    fn finished(&self) -> bool {
        self.is_complete()
    }
}

/// Case-insensitive title comparison, locale independent: lowercase
/// both sides, then compare.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Order a collection for display: unfinished before finished, each
/// group sorted by title. Equal titles keep their incoming relative
/// order (the sort is stable), which is whatever the query produced.
pub fn sorted<T: SortItem>(items: Vec<T>) -> Vec<T> {
    let (mut unfinished, mut finished): (Vec<T>, Vec<T>) =
        items.into_iter().partition(|item| !item.finished());

    unfinished.sort_by(|a, b| compare_titles(a.title(), b.title()));
    finished.sort_by(|a, b| compare_titles(a.title(), b.title()));

    unfinished.extend(finished);
    unfinished
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

    fn list(id: i32, title: &str, todos: Vec<Todo>) -> TodoList {
        TodoList {
            id,
            title: title.to_owned(),
            todos,
        }
    }

    fn titles<T: SortItem>(items: &[T]) -> Vec<&str> {
        items.iter().map(|item| item.title()).collect()
    }

    #[test]
    fn titles_compare_case_insensitively() {
        assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_titles("Apple", "apple"), Ordering::Equal);
        assert_eq!(compare_titles("zebra", "Apple"), Ordering::Greater);
    }

    #[test]
    fn undone_todos_come_before_done_ones() {
        let sorted = sorted(vec![
            todo(1, "Bread", true),
            todo(2, "Milk", false),
            todo(3, "apples", true),
            todo(4, "Zucchini", false),
        ]);

        assert_eq!(titles(&sorted), vec!["Milk", "Zucchini", "apples", "Bread"]);
        assert!(sorted.iter().take(2).all(|t| !t.done));
        assert!(sorted.iter().skip(2).all(|t| t.done));
    }

    #[test]
    fn groceries_scenario_ordering() {
        // Milk undone, Bread done: undone group leads despite title order.
        let mixed = sorted(vec![todo(1, "Milk", false), todo(2, "Bread", true)]);
        assert_eq!(titles(&mixed), vec!["Milk", "Bread"]);

        // Once Milk is done too, the single done group is title-sorted.
        let all_done = sorted(vec![todo(1, "Milk", true), todo(2, "Bread", true)]);
        assert_eq!(titles(&all_done), vec!["Bread", "Milk"]);
    }

    #[test]
    fn complete_lists_sort_after_incomplete_ones() {
        let complete = list(1, "Archive", vec![todo(1, "File", true)]);
        let incomplete = list(2, "Work", vec![todo(2, "Report", false)]);
        let empty = list(3, "Someday", vec![]);

        let sorted = sorted(vec![complete, incomplete, empty]);

        // An empty list is not complete, so it sorts with the leading group.
        assert_eq!(titles(&sorted), vec!["Someday", "Work", "Archive"]);
    }

    #[test]
    fn equal_titles_keep_incoming_order() {
        let sorted = sorted(vec![
            todo(1, "milk", false),
            todo(2, "MILK", false),
            todo(3, "Milk", false),
        ]);

        let ids: Vec<i32> = sorted.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(sorted(Vec::<Todo>::new()).is_empty());
    }
}
