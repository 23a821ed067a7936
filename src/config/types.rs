//! Configuration constants and default value functions.

use crate::session::DEFAULT_WELCOME_MESSAGE;
use serde_json::Value;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "promptsmith.yaml";

/// Starter suggestions shown with the first welcome message.
pub fn default_welcome_suggestions() -> Vec<String> {
    vec![
        "Create a lead qualification prompt".to_string(),
        "Generate a customer service response".to_string(),
        "Build a sales follow-up template".to_string(),
        "Design a data analysis prompt".to_string(),
    ]
}

// Default value functions for serde
pub(crate) fn default_generator_timeout_seconds() -> u64 {
    120
}
pub(crate) fn default_context() -> Value {
    Value::Object(serde_json::Map::new())
}
pub(crate) fn default_templates_dir() -> String {
    "templates".to_string()
}
pub(crate) fn default_events_file() -> String {
    ".promptsmith/events.ndjson".to_string()
}
pub(crate) fn default_welcome_message() -> String {
    DEFAULT_WELCOME_MESSAGE.to_string()
}
pub(crate) fn default_log_filter() -> String {
    "promptsmith=info".to_string()
}
