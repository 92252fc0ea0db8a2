//! View-model derivation for the task list screen.
//!
//! # Responsibility
//! - Derive the visible subset of tasks from the full collection plus
//!   the active filter and optional day bucket.
//!
//! # Invariants
//! - Derivation is a pure predicate; source order is always preserved
//!   and nothing is sorted.

pub mod task_view;
