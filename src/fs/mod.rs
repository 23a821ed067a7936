//! Filesystem helpers.
//!
//! Saved templates are written with [`atomic_write_file`] so a crash never
//! leaves a half-written YAML document behind.

pub mod atomic;

pub use atomic::{atomic_write, atomic_write_file};
