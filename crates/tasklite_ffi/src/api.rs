//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple: failures degrade to envelopes, the UI
//!   shows "no visible change" rather than an exception.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - List order is the store's insertion order; nothing here sorts.

use log::warn;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tasklite_core::db::open_db;
use tasklite_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    DayBucket, Filter, SqliteTaskRepository, Task, TaskService, TaskView,
};

const DB_FILE_NAME: &str = "tasklite.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same configuration (idempotent).
/// - Never panics; returns empty string on success and an error message
///   on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Registers the directory holding the task database.
///
/// Input semantics:
/// - `db_dir`: absolute directory path; the database file is created
///   inside it on first store use.
///
/// # FFI contract
/// - Sync call; may create the directory.
/// - Safe to call repeatedly with the same directory (idempotent).
/// - Reconfiguration attempts with a different directory return an error.
/// - Never panics; returns empty string on success and an error message
///   on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_dir(db_dir: String) -> String {
    match register_db_dir(db_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task record crossing the FFI boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiTask {
    /// Storage-assigned task id.
    pub id: i64,
    /// User-entered task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// List response envelope for the task list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Visible tasks after filter and optional bucket, in insertion order.
    pub items: Vec<FfiTask>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for mutating intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation changed anything.
    pub ok: bool,
    /// Id of the task the operation created or targeted.
    pub task_id: Option<i64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: i64) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Lists tasks visible under the given filter and optional day bucket.
///
/// Input semantics:
/// - `filter`: `all|completed|pending`; unknown or missing values fall
///   back to `pending` (the screen default).
/// - `bucket`: `today|yesterday`; unknown or missing values mean no
///   bucket restriction.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; failures return an empty list with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_list(filter: Option<String>, bucket: Option<String>) -> TaskListResponse {
    let view = TaskView {
        filter: parse_filter(filter.as_deref()),
        bucket: parse_bucket(bucket.as_deref()),
    };

    match with_task_service(|service| Ok(view.visible(service.list()))) {
        Ok(tasks) => {
            let message = if tasks.is_empty() {
                "No tasks.".to_string()
            } else {
                format!("{} task(s).", tasks.len())
            };
            TaskListResponse {
                items: tasks.into_iter().map(to_ffi_task).collect(),
                message,
            }
        }
        Err(err) => TaskListResponse {
            items: Vec::new(),
            message: format!("tasks_list failed: {err}"),
        },
    }
}

/// Adds a task from the input field.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Blank text produces `ok=false` and no new row.
/// - Never panics; returns the created task id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(text: String) -> TaskActionResponse {
    match with_task_service(|service| service.add(&text).map_err(|err| err.to_string())) {
        Ok(Some(task)) => TaskActionResponse::success("Task created.", task.id),
        Ok(None) => TaskActionResponse::failure("Task text is empty."),
        Err(err) => TaskActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// Toggles the completion flag of one task.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Missing ids are a no-op reported as success.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: i64) -> TaskActionResponse {
    match with_task_service(|service| service.toggle(id).map_err(|err| err.to_string())) {
        Ok(()) => TaskActionResponse::success("Task toggled.", id),
        Err(err) => TaskActionResponse::failure(format!("task_toggle failed: {err}")),
    }
}

/// Replaces the text of one task.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Missing ids are a no-op reported as success.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit(id: i64, text: String) -> TaskActionResponse {
    match with_task_service(|service| service.edit(id, &text).map_err(|err| err.to_string())) {
        Ok(()) => TaskActionResponse::success("Task updated.", id),
        Err(err) => TaskActionResponse::failure(format!("task_edit failed: {err}")),
    }
}

/// Permanently deletes one task.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Missing ids are a no-op reported as success.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(id: i64) -> TaskActionResponse {
    match with_task_service(|service| service.delete(id).map_err(|err| err.to_string())) {
        Ok(()) => TaskActionResponse::success("Task deleted.", id),
        Err(err) => TaskActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

fn parse_filter(value: Option<&str>) -> Filter {
    match value.map(str::trim) {
        Some("all") => Filter::All,
        Some("completed") => Filter::Completed,
        Some("pending") | None => Filter::Pending,
        Some(other) => {
            warn!("event=parse_filter module=ffi status=fallback value={other}");
            Filter::Pending
        }
    }
}

fn parse_bucket(value: Option<&str>) -> Option<DayBucket> {
    match value.map(str::trim) {
        Some("today") => Some(DayBucket::Today),
        Some("yesterday") => Some(DayBucket::Yesterday),
        None => None,
        Some(other) => {
            warn!("event=parse_bucket module=ffi status=fallback value={other}");
            None
        }
    }
}

fn register_db_dir(db_dir: &str) -> Result<(), String> {
    let trimmed = db_dir.trim();
    if trimmed.is_empty() {
        return Err("db_dir cannot be empty".to_string());
    }
    let dir = Path::new(trimmed);
    if !dir.is_absolute() {
        return Err(format!("db_dir must be an absolute path, got `{trimmed}`"));
    }
    std::fs::create_dir_all(dir)
        .map_err(|err| format!("failed to create db directory `{trimmed}`: {err}"))?;

    let path = dir.join(DB_FILE_NAME);
    if DB_PATH.set(path.clone()).is_ok() {
        return Ok(());
    }
    match DB_PATH.get() {
        Some(active) if *active == path => Ok(()),
        Some(active) => Err(format!(
            "store already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            path.display()
        )),
        None => Err("store configuration is not available".to_string()),
    }
}

fn resolve_db_path() -> Result<PathBuf, String> {
    if let Some(path) = DB_PATH.get() {
        return Ok(path.clone());
    }

    // Test/dev override; registered once, exactly like a configure call.
    if let Ok(raw) = std::env::var("TASKLITE_DB_PATH") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            let _ = DB_PATH.set(PathBuf::from(trimmed));
            if let Some(path) = DB_PATH.get() {
                return Ok(path.clone());
            }
        }
    }

    Err("store not configured; call configure_db_dir first".to_string())
}

fn with_task_service<T>(
    f: impl FnOnce(&mut TaskService<SqliteTaskRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_db_path()?;
    let conn = open_db(&db_path).map_err(|err| format!("task DB open failed: {err}"))?;
    let repo = SqliteTaskRepository::new(&conn);
    let mut service = TaskService::open(repo).map_err(|err| err.to_string())?;
    f(&mut service)
}

fn to_ffi_task(task: Task) -> FfiTask {
    FfiTask {
        id: task.id,
        text: task.text,
        completed: task.completed,
        created_at: task.created_at,
    }
}
