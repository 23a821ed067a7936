//! Message log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Session-unique message identifier: `msg_{sequence}_{epoch_millis}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Compose an id from the session sequence counter and creation instant.
    pub fn compose(sequence: u64, created_at: DateTime<Utc>) -> Self {
        Self(format!("msg_{}_{}", sequence, created_at.timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    Error,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::Error => write!(f, "error"),
        }
    }
}

/// Extra data attached to successful assistant replies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// Role-specific part of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum MessageKind {
    User,
    Assistant {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<ReplyMetadata>,
    },
    Error,
}

/// One immutable entry in the session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub created_at: DateTime<Utc>,
    pub content: String,
    #[serde(flatten)]
    pub kind: MessageKind,
}

impl Message {
    pub fn role(&self) -> Role {
        match self.kind {
            MessageKind::User => Role::User,
            MessageKind::Assistant { .. } => Role::Assistant,
            MessageKind::Error => Role::Error,
        }
    }

    /// Metadata of an assistant reply, if any.
    pub fn metadata(&self) -> Option<&ReplyMetadata> {
        match &self.kind {
            MessageKind::Assistant { metadata } => metadata.as_ref(),
            MessageKind::User | MessageKind::Error => None,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self.kind, MessageKind::User)
    }
}

/// Actions the message UI can request on a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageAction {
    Copy,
    Edit,
    Regenerate,
}

impl MessageAction {
    /// Parse an action name.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "copy" => Some(Self::Copy),
            "edit" => Some(Self::Edit),
            "regenerate" => Some(Self::Regenerate),
            _ => None,
        }
    }
}

impl fmt::Display for MessageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageAction::Copy => write!(f, "copy"),
            MessageAction::Edit => write!(f, "edit"),
            MessageAction::Regenerate => write!(f, "regenerate"),
        }
    }
}
