//! Flutter-facing FFI crate for tasklite.

pub mod api;
