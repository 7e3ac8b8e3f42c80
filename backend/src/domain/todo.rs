//! Todo item aggregate and its value objects.
//!
//! A [`Todo`] is created through [`Todo::create`] and only changes through the
//! named mutators. Every mutator reports whether it changed anything and bumps
//! `updated_at` only when it did, so repeating an operation is a no-op.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Maximum todo text length in characters.
pub const TODO_TEXT_MAX: usize = 100;
/// Maximum category label length in characters.
pub const CATEGORY_MAX: usize = 50;
/// Category applied when a request omits one.
pub const DEFAULT_CATEGORY: &str = "personal";

/// Validation errors returned by todo value object constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    EmptyText,
    TextTooLong { max: usize },
    CategoryTooLong { max: usize },
}

impl TodoValidationError {
    /// Request field the failure relates to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyText | Self::TextTooLong { .. } => "text",
            Self::CategoryTooLong { .. } => "category",
        }
    }

    /// Stable machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyText => "blank",
            Self::TextTooLong { .. } | Self::CategoryTooLong { .. } => "too_long",
        }
    }
}

impl fmt::Display for TodoValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "todo text must not be blank"),
            Self::TextTooLong { max } => {
                write!(f, "todo text must be at most {max} characters")
            }
            Self::CategoryTooLong { max } => {
                write!(f, "category must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for TodoValidationError {}

/// Stable todo identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Validated todo text: non-blank and at most [`TODO_TEXT_MAX`] characters.
///
/// The text is stored as given; surrounding whitespace is only considered when
/// checking for blankness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoText(String);

impl TodoText {
    /// Validate and construct todo text.
    ///
    /// # Examples
    /// ```
    /// use todo_backend::domain::{TodoText, TodoValidationError};
    ///
    /// assert!(TodoText::new("buy milk").is_ok());
    /// assert_eq!(TodoText::new("   "), Err(TodoValidationError::EmptyText));
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, TodoValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TodoValidationError::EmptyText);
        }
        if text.chars().count() > TODO_TEXT_MAX {
            return Err(TodoValidationError::TextTooLong { max: TODO_TEXT_MAX });
        }
        Ok(Self(text))
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for TodoText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Free-form category label, at most [`CATEGORY_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category(String);

impl Category {
    /// Validate and construct a category label.
    pub fn new(category: impl Into<String>) -> Result<Self, TodoValidationError> {
        let category = category.into();
        if category.chars().count() > CATEGORY_MAX {
            return Err(TodoValidationError::CategoryTooLong { max: CATEGORY_MAX });
        }
        Ok(Self(category))
    }

    /// Validate an optional label, falling back to [`DEFAULT_CATEGORY`].
    pub fn or_default(category: Option<String>) -> Result<Self, TodoValidationError> {
        category.map_or_else(|| Ok(Self::default()), Self::new)
    }

    /// Borrow the label.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for Category {
    fn default() -> Self {
        Self(DEFAULT_CATEGORY.to_owned())
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named state change applied to a stored todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoMutation {
    /// Replace text and category.
    Edit { text: TodoText, category: Category },
    /// Mark the todo completed.
    Complete,
    /// Mark the todo not completed.
    Incomplete,
}

/// Field bundle used to rebuild a todo from storage.
#[derive(Debug, Clone)]
pub struct TodoDraft {
    pub id: TodoId,
    pub text: TodoText,
    pub category: Category,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: TodoId,
    text: TodoText,
    category: Category,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Todo {
    /// Create a new, not yet completed todo.
    ///
    /// Both timestamps are taken from the single `now` reading.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use todo_backend::domain::{Category, Todo, TodoText};
    ///
    /// let now = Utc::now();
    /// let todo = Todo::create(TodoText::new("buy milk").unwrap(), Category::default(), now);
    /// assert!(!todo.completed());
    /// assert_eq!(todo.created_at(), todo.updated_at());
    /// ```
    pub fn create(text: TodoText, category: Category, now: DateTime<Utc>) -> Self {
        Self {
            id: TodoId::random(),
            text,
            category,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a todo from persisted fields.
    pub fn restore(draft: TodoDraft) -> Self {
        let TodoDraft {
            id,
            text,
            category,
            completed,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            text,
            category,
            completed,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn text(&self) -> &TodoText {
        &self.text
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace text and category. Returns `false` when both are unchanged.
    pub fn edit(&mut self, text: TodoText, category: Category, now: DateTime<Utc>) -> bool {
        if self.text == text && self.category == category {
            return false;
        }
        self.text = text;
        self.category = category;
        self.touch(now);
        true
    }

    /// Mark the todo completed. Returns `false` when it already was.
    pub fn mark_completed(&mut self, now: DateTime<Utc>) -> bool {
        self.set_completed(true, now)
    }

    /// Mark the todo not completed. Returns `false` when it already was.
    pub fn mark_incomplete(&mut self, now: DateTime<Utc>) -> bool {
        self.set_completed(false, now)
    }

    /// Apply a [`TodoMutation`], returning whether the todo changed.
    pub fn apply(&mut self, mutation: &TodoMutation, now: DateTime<Utc>) -> bool {
        match mutation {
            TodoMutation::Edit { text, category } => self.edit(text.clone(), category.clone(), now),
            TodoMutation::Complete => self.mark_completed(now),
            TodoMutation::Incomplete => self.mark_incomplete(now),
        }
    }

    fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) -> bool {
        if self.completed == completed {
            return false;
        }
        self.completed = completed;
        self.touch(now);
        true
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        // Clock readings that go backwards never move updated_at before created_at.
        self.updated_at = now.max(self.created_at);
    }
}
