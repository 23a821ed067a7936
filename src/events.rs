//! Outbound engine events.
//!
//! The session controller and the template form never call listeners
//! directly. Each operation records [`EngineEvent`]s into an outbox that the
//! caller drains; the CLI forwards them to stdout and to an append-only NDJSON
//! log.
//!
//! # Event Format
//!
//! Each NDJSON line is a JSON object with:
//! - `ts`: RFC3339 timestamp
//! - `actor`: the owner string (e.g., `user@HOST`)
//! - `event`: the event kind (`generated`, `message_action`, ...)
//! - kind-specific payload fields in camelCase
//!
//! ```no_run
//! use promptsmith::events::{EngineEvent, Event, append_event};
//!
//! let event = Event::new(EngineEvent::Generated {
//!     prompt: "You are a helpful assistant".to_string(),
//!     user_query: "write a support prompt".to_string(),
//! });
//! append_event(".promptsmith/events.ndjson", &event)?;
//! # Ok::<(), promptsmith::error::PromptsmithError>(())
//! ```

use crate::error::{PromptsmithError, Result};
use crate::session::{MessageAction, MessageId};
use crate::template::SavedTemplate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Events emitted by the engine to external consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum EngineEvent {
    /// A generation completed with an artifact. Emitted once per success.
    Generated { prompt: String, user_query: String },

    /// A copy/edit/regenerate request originating in the message UI.
    MessageAction {
        action: MessageAction,
        message_id: MessageId,
    },

    /// The session log changed; carries the new message count.
    LogChanged { message_count: usize },

    /// A valid draft was handed off for persistence.
    TemplateSaved {
        template_id: String,
        template_data: SavedTemplate,
    },

    /// The formatted template was copied to the clipboard.
    TemplateCopied {
        template_name: String,
        template_content: String,
    },
}

impl EngineEvent {
    /// Short kind name, matching the serialized `event` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineEvent::Generated { .. } => "generated",
            EngineEvent::MessageAction { .. } => "message_action",
            EngineEvent::LogChanged { .. } => "log_changed",
            EngineEvent::TemplateSaved { .. } => "template_saved",
            EngineEvent::TemplateCopied { .. } => "template_copied",
        }
    }
}

/// An event record for the NDJSON log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event was recorded.
    pub ts: DateTime<Utc>,

    /// The actor who produced the event (e.g., `user@HOST`).
    pub actor: String,

    #[serde(flatten)]
    pub payload: EngineEvent,
}

impl Event {
    /// Wrap an engine event, stamping the current time and actor.
    pub fn new(payload: EngineEvent) -> Self {
        Self {
            ts: Utc::now(),
            actor: get_actor_string(),
            payload,
        }
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            PromptsmithError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to an NDJSON log file.
///
/// The parent directory and the file are created when missing. Each call
/// writes exactly one line with a trailing newline.
pub fn append_event<P: AsRef<Path>>(path: P, event: &Event) -> Result<()> {
    let path = path.as_ref();
    let json_line = event.to_ndjson_line()?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            PromptsmithError::UserError(format!(
                "failed to create events directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            PromptsmithError::UserError(format!(
                "failed to open events file '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        PromptsmithError::UserError(format!(
            "failed to write event to '{}': {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(kind = event.payload.kind(), path = %path.display(), "event appended");
    Ok(())
}
