//! Domain model for the task collection.
//!
//! # Responsibility
//! - Define the canonical task record used by core business logic.
//!
//! # Invariants
//! - Every task is identified by a storage-assigned `TaskId`.
//! - Deletion is permanent; there are no tombstones or versions.

pub mod task;
