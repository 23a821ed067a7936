//! Exit code constants for the promptsmith CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable config or files)
//! - 2: Validation failure (template draft missing required fields)
//! - 3: Generation failure (collaborator rejected or returned no artifact)
//! - 4: Clipboard failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or unreadable input.
pub const USER_ERROR: i32 = 1;

/// Validation failure: template draft is missing a required field.
pub const VALIDATION_FAILURE: i32 = 2;

/// Generation failure: the generation collaborator failed or returned no artifact.
pub const GENERATION_FAILURE: i32 = 3;

/// Clipboard failure: the clipboard write did not succeed.
pub const CLIPBOARD_FAILURE: i32 = 4;
