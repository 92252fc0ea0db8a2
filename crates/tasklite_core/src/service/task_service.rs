//! Task store use-case service.
//!
//! # Responsibility
//! - Own the in-memory task mirror, the single source of truth for
//!   callers between persistence calls.
//! - Execute each user intent as exactly one statement against storage,
//!   then update the mirror.
//!
//! # Invariants
//! - Blank task text never reaches storage through `add`.
//! - A missing id degrades to a logged no-op, never an error surfaced to
//!   the caller.
//! - The mirror preserves insertion order; nothing here sorts.

use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use chrono::{SecondsFormat, Utc};
use log::{debug, warn};

/// Single source of truth for the task collection.
///
/// The UI serializes intents (one gesture at a time), so mutating
/// methods take `&mut self` and there is no interior locking.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a store over the given repository with an empty mirror.
    ///
    /// Call [`TaskService::load`] to populate the mirror from storage.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            tasks: Vec::new(),
        }
    }

    /// Creates a store and immediately loads the mirror from storage.
    pub fn open(repo: R) -> RepoResult<Self> {
        let mut service = Self::new(repo);
        service.load()?;
        Ok(service)
    }

    /// Refreshes the in-memory mirror from storage.
    pub fn load(&mut self) -> RepoResult<&[Task]> {
        self.tasks = self.repo.list_tasks()?;
        debug!(
            "event=store_load module=service status=ok count={}",
            self.tasks.len()
        );
        Ok(&self.tasks)
    }

    /// Returns all tasks currently known, in insertion order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Persists a new task and returns it with its assigned id.
    ///
    /// # Contract
    /// - Returns `Ok(None)` without touching storage when `text` is
    ///   empty after trimming.
    /// - New tasks start with `completed = false` and the current UTC
    ///   timestamp in RFC 3339 form.
    pub fn add(&mut self, text: &str) -> RepoResult<Option<Task>> {
        if text.trim().is_empty() {
            debug!("event=task_add module=service status=rejected reason=blank_text");
            return Ok(None);
        }

        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let id = self.repo.insert_task(text, false, &created_at)?;
        let task = Task::new(id, text, false, created_at);
        self.tasks.push(task.clone());

        debug!("event=task_add module=service status=ok id={id}");
        Ok(Some(task))
    }

    /// Flips the completion flag of the task with the given id.
    ///
    /// No effect when the id does not exist.
    pub fn toggle(&mut self, id: TaskId) -> RepoResult<()> {
        let Some(index) = self.position(id) else {
            warn!("event=task_toggle module=service status=noop reason=not_found id={id}");
            return Ok(());
        };

        let next = !self.tasks[index].completed;
        match self.repo.update_task_completed(id, next) {
            Ok(()) => {
                self.tasks[index].completed = next;
                debug!("event=task_toggle module=service status=ok id={id} completed={next}");
                Ok(())
            }
            Err(err) => absorb_not_found(err, "task_toggle", id),
        }
    }

    /// Replaces the text of the task with the given id.
    ///
    /// No effect when the id does not exist. Unlike `add`, this accepts
    /// blank text.
    // TODO: decide whether edit should reject blank text the way add does.
    pub fn edit(&mut self, id: TaskId, new_text: &str) -> RepoResult<()> {
        let Some(index) = self.position(id) else {
            warn!("event=task_edit module=service status=noop reason=not_found id={id}");
            return Ok(());
        };

        match self.repo.update_task_text(id, new_text) {
            Ok(()) => {
                self.tasks[index].text = new_text.to_string();
                debug!("event=task_edit module=service status=ok id={id}");
                Ok(())
            }
            Err(err) => absorb_not_found(err, "task_edit", id),
        }
    }

    /// Permanently removes the task with the given id.
    ///
    /// No effect when the id does not exist.
    pub fn delete(&mut self, id: TaskId) -> RepoResult<()> {
        match self.repo.delete_task(id) {
            Ok(()) => {
                self.tasks.retain(|task| task.id != id);
                debug!("event=task_delete module=service status=ok id={id}");
                Ok(())
            }
            Err(err) => absorb_not_found(err, "task_delete", id),
        }
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

// Mirror and storage can disagree when another connection mutates the same
// file; treat storage-side not-found the same as mirror-side.
fn absorb_not_found(err: RepoError, event: &str, id: TaskId) -> RepoResult<()> {
    match err {
        RepoError::NotFound(_) => {
            warn!("event={event} module=service status=noop reason=not_found id={id}");
            Ok(())
        }
        other => Err(other),
    }
}
