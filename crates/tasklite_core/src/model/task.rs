//! Task domain model.
//!
//! # Responsibility
//! - Define the single entity this application persists and displays.
//!
//! # Invariants
//! - `id` is assigned by the persistence layer and never reused while the
//!   store lives.
//! - `created_at` is immutable after creation and only consulted for
//!   day-bucket derivation.

use serde::{Deserialize, Serialize};

/// Stable identifier assigned by SQLite on insert.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// A single to-do item.
///
/// `text` is guaranteed non-blank when the task entered through the add
/// path; the edit path does not re-validate (see the service layer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Storage-assigned row id.
    pub id: TaskId,
    /// User-entered task text.
    pub text: String,
    /// Completion flag, `false` at creation.
    pub completed: bool,
    /// RFC 3339 creation timestamp, stored verbatim.
    pub created_at: String,
}

impl Task {
    /// Builds a task from already-persisted fields.
    pub fn new(
        id: TaskId,
        text: impl Into<String>,
        completed: bool,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            completed,
            created_at: created_at.into(),
        }
    }

    /// Flips the completion flag in place.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }
}
