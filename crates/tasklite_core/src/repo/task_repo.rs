//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the five statement shapes the store needs: select-all,
//!   insert, update-text, update-completed, delete.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `list_tasks` returns rows in insertion order (`ORDER BY id ASC`);
//!   the view layer depends on the persistence layer never reordering.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::task::{Task, TaskId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_SELECT_SQL: &str = "SELECT id, text, completed, created_at FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for task CRUD operations.
///
/// Each method maps to exactly one SQL statement; there is no batching
/// and no multi-statement transaction in this contract.
pub trait TaskRepository {
    /// Returns all tasks in insertion order.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Inserts a new row and returns its storage-assigned id.
    fn insert_task(&self, text: &str, completed: bool, created_at: &str) -> RepoResult<TaskId>;
    /// Replaces the text of an existing task.
    fn update_task_text(&self, id: TaskId, text: &str) -> RepoResult<()>;
    /// Sets the completion flag of an existing task.
    fn update_task_completed(&self, id: TaskId, completed: bool) -> RepoResult<()>;
    /// Permanently removes a task.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn insert_task(&self, text: &str, completed: bool, created_at: &str) -> RepoResult<TaskId> {
        self.conn.execute(
            "INSERT INTO tasks (text, completed, created_at) VALUES (?1, ?2, ?3);",
            params![text, bool_to_int(completed), created_at],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_task_text(&self, id: TaskId, text: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET text = ?1 WHERE id = ?2;",
            params![text, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn update_task_completed(&self, id: TaskId, completed: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET completed = ?1 WHERE id = ?2;",
            params![bool_to_int(completed), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    Ok(Task {
        id: row.get("id")?,
        text: row.get("text")?,
        completed,
        created_at: row.get("created_at")?,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
