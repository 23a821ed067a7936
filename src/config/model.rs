//! Config struct definition and default implementation.

use super::types::*;
use crate::template::CategoryPolicy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration for promptsmith.
///
/// This struct represents the contents of `promptsmith.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Generation settings
    // =========================================================================
    /// Command run for every generation request (shell-words parsed; no shell).
    /// The request JSON is written to its stdin.
    #[serde(default)]
    pub generator_command: String,

    /// Seconds before a generator command is killed.
    #[serde(default = "default_generator_timeout_seconds")]
    pub generator_timeout_seconds: u64,

    /// JSON object sent as `contextData` with every request.
    #[serde(default = "default_context")]
    pub context: Value,

    // =========================================================================
    // Session settings
    // =========================================================================
    /// Greeting seeded into a fresh or cleared session.
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,

    /// Suggestions attached to the first greeting.
    #[serde(default = "default_welcome_suggestions")]
    pub welcome_suggestions: Vec<String>,

    // =========================================================================
    // Template settings
    // =========================================================================
    /// Whether a category is required for a draft to be valid.
    #[serde(default)]
    pub category_policy: CategoryPolicy,

    /// Directory saved templates are written to.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    // =========================================================================
    // Integration settings
    // =========================================================================
    /// Command receiving copied text on stdin (empty disables copying).
    #[serde(default)]
    pub clipboard_command: String,

    /// NDJSON file outbound events are appended to (empty disables).
    #[serde(default = "default_events_file")]
    pub events_file: String,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator_command: String::new(),
            generator_timeout_seconds: default_generator_timeout_seconds(),
            context: default_context(),
            welcome_message: default_welcome_message(),
            welcome_suggestions: default_welcome_suggestions(),
            category_policy: CategoryPolicy::default(),
            templates_dir: default_templates_dir(),
            clipboard_command: String::new(),
            events_file: default_events_file(),
            log_filter: default_log_filter(),
        }
    }
}
