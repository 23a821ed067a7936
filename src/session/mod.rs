//! Chat session controller.
//!
//! This module provides:
//!
//! - **Message**: immutable, append-only log entries tagged by role
//! - **ChatSession**: the turn-taking state machine around the log
//!
//! # Submission protocol
//!
//! A submission is split in two so callers can interleave other handlers
//! while the generation collaborator is pending:
//!
//! 1. [`ChatSession::begin_submit`] appends the user message synchronously,
//!    enters `Generating`, and mints a [`GenerationToken`].
//! 2. [`ChatSession::resolve`] appends the assistant or error message for
//!    that token and returns to `Idle`.
//!
//! [`ChatSession::submit`] runs both steps around a single `await`.

mod controller;
mod message;


pub use controller::{
    ActionOutcome, ChatSession, DEFAULT_WELCOME_MESSAGE, GenerationToken, PendingGeneration,
    SessionOptions, SessionSnapshot, SessionState, SubmitOutcome,
};
pub use message::{Message, MessageAction, MessageId, MessageKind, ReplyMetadata, Role};
