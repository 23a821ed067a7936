//! Error types for promptsmith.
//!
//! Uses thiserror for derive macros. Every variant maps to a process exit code
//! so the CLI can report failures the same way the engine classifies them.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for promptsmith operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptsmithError {
    /// A submission was blank after trimming. The session ignores these.
    #[error("input is empty")]
    EmptyInput,

    /// The generation collaborator rejected the request or returned no artifact.
    #[error("{0}")]
    GenerationFailure(String),

    /// A template draft is missing required fields.
    #[error("missing required field(s): {}", .0.join(", "))]
    ValidationError(Vec<String>),

    /// Writing to the clipboard failed.
    #[error("clipboard write failed: {0}")]
    ClipboardError(String),

    /// Bad arguments, unreadable files, or an invalid configuration.
    #[error("{0}")]
    UserError(String),
}

impl PromptsmithError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PromptsmithError::EmptyInput => exit_codes::USER_ERROR,
            PromptsmithError::UserError(_) => exit_codes::USER_ERROR,
            PromptsmithError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            PromptsmithError::GenerationFailure(_) => exit_codes::GENERATION_FAILURE,
            PromptsmithError::ClipboardError(_) => exit_codes::CLIPBOARD_FAILURE,
        }
    }
}

/// Result type alias for promptsmith operations.
pub type Result<T> = std::result::Result<T, PromptsmithError>;
