//! Completion filter and day-bucket predicates.
//!
//! # Responsibility
//! - Define the filter state the task list screen exposes and the pure
//!   functions deriving the visible subset from it.
//!
//! # Invariants
//! - `|completed| + |pending| == |all|` for any input collection.
//! - A task whose `created_at` does not parse as RFC 3339 falls in
//!   neither day bucket; it stays visible in unbucketed views.

use crate::model::task::Task;
use chrono::{DateTime, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Completion-status predicate applied to the task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Show every task regardless of completion.
    All,
    /// Show only completed tasks.
    Completed,
    /// Show only tasks still open. Default for the list screen.
    #[default]
    Pending,
}

/// Calendar-day grouping of tasks by creation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBucket {
    Today,
    Yesterday,
}

impl Filter {
    /// Whether a task passes this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
        }
    }
}

/// Returns the subset of `tasks` passing `filter`, in source order.
pub fn filter_tasks(tasks: &[Task], filter: Filter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}

/// Returns the subset of `tasks` created on the bucket's calendar day,
/// in source order.
///
/// `reference` is the local calendar date standing in for "today";
/// injected so derivation stays deterministic under test.
pub fn bucket_tasks(tasks: &[Task], bucket: DayBucket, reference: NaiveDate) -> Vec<Task> {
    let Some(wanted) = bucket_date(bucket, reference) else {
        return Vec::new();
    };

    tasks
        .iter()
        .filter(|task| local_creation_date(task) == Some(wanted))
        .cloned()
        .collect()
}

fn bucket_date(bucket: DayBucket, reference: NaiveDate) -> Option<NaiveDate> {
    match bucket {
        DayBucket::Today => Some(reference),
        DayBucket::Yesterday => reference.checked_sub_days(Days::new(1)),
    }
}

/// Local calendar day a task was created on, `None` when `created_at`
/// does not parse.
fn local_creation_date(task: &Task) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(&task.created_at)
        .ok()
        .map(|instant| instant.with_timezone(&Local).date_naive())
}

/// Filter state of the task list screen.
///
/// The day bucket, when set, restricts on top of the completion filter,
/// matching how the tabbed screen layers the two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskView {
    pub filter: Filter,
    pub bucket: Option<DayBucket>,
}

impl TaskView {
    /// Derives the visible subset against an explicit reference date.
    pub fn visible_at(&self, tasks: &[Task], reference: NaiveDate) -> Vec<Task> {
        let filtered = filter_tasks(tasks, self.filter);
        match self.bucket {
            Some(bucket) => bucket_tasks(&filtered, bucket, reference),
            None => filtered,
        }
    }

    /// Derives the visible subset using the device-local current date.
    pub fn visible(&self, tasks: &[Task]) -> Vec<Task> {
        self.visible_at(tasks, Local::now().date_naive())
    }
}
