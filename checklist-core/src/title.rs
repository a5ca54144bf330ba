//! Validated title newtypes.
//!
//! Titles are trimmed and must be 1..=100 characters, matching the
//! form rules the web layer enforces. Stores only accept the validated
//! types, so an out-of-range title never reaches a query.

use std::fmt;

/// Maximum title length for both lists and todos.
const MAX_TITLE_LEN: usize = 100;

/// Validation error for domain input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty after trimming
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::TooLong { field, max } => {
                write!(f, "{} must be at most {} characters", field, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn validate(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TITLE_LEN,
        });
    }

    Ok(trimmed.to_owned())
}

/// Validated todo-list title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTitle(String);

impl ListTitle {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        validate("list title", raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ListTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated todo title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        validate("todo title", raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
