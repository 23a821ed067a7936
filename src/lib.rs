//! Promptsmith: conversational prompt authoring.
//!
//! Two engines make up the crate:
//!
//! - [`session`]: a turn-taking chat controller that forwards user requests
//!   to a generation collaborator and keeps an append-only message log
//! - [`template`]: an editable template draft whose variable list stays in
//!   sync with the `{{identifier}}` placeholders in its content
//!
//! Collaborators (generation, clipboard, persistence) sit behind small
//! traits and types so the engines stay deterministic under test.

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod generation;
pub mod notify;
pub mod session;
pub mod store;
pub mod template;

#[cfg(test)]
pub(crate) mod test_support;
