//! Chat session controller.

use super::message::{Message, MessageAction, MessageId, MessageKind, ReplyMetadata};
use crate::clipboard::Clipboard;
use crate::events::EngineEvent;
use crate::generation::{
    GenerationError, GenerationRequest, GenerationResult, Generator, MISSING_ARTIFACT_MESSAGE,
};
use crate::notify::Notification;
use chrono::Utc;

/// Greeting seeded on activation and after every clear.
pub const DEFAULT_WELCOME_MESSAGE: &str = "Hello! I'm your prompt assistant. Describe the behavior you want and I'll draft a reusable prompt for it.";

const IDLE_INPUT_HINT: &str = "Describe the prompt you need...";
const GENERATING_INPUT_HINT: &str = "Generating prompt... Please wait...";

/// Turn-taking state, derived from whether a request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Generating,
}

/// Identifies one generation attempt. Minted at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationToken(u64);

/// A submission that has been accepted and awaits its collaborator result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGeneration {
    pub token: GenerationToken,
    pub request: GenerationRequest,
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank query or a generation already outstanding; nothing changed.
    Ignored,
    /// An assistant message carrying the artifact was appended.
    Generated(MessageId),
    /// An error message was appended.
    Failed(MessageId),
    /// The resolution belonged to an attempt invalidated by `clear()`.
    Discarded,
}

/// Result of a message action request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Copied,
    CopyFailed,
    Edited,
    Regenerated(SubmitOutcome),
    /// Unknown message id, or the action does not apply to that message.
    Ignored,
}

/// Static inputs for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub welcome_message: String,
    /// Starter suggestions attached to the first welcome message only.
    pub welcome_suggestions: Vec<String>,
    /// Serialized JSON object sent as `contextData` with every request.
    pub context_data: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            welcome_suggestions: Vec::new(),
            context_data: "{}".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct InFlight {
    token: GenerationToken,
    query: String,
}

/// Owned, read-only view of a session for presentation layers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub messages: Vec<Message>,
    pub state: SessionState,
    pub input: String,
    pub input_hint: &'static str,
}

/// Owns the message log, the pending input buffer, and turn-taking state.
///
/// Outbound events and notifications are buffered; drain them with
/// [`ChatSession::take_events`] and [`ChatSession::take_notifications`].
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<Message>,
    id_counter: u64,
    input: String,
    in_flight: Option<InFlight>,
    next_token: u64,
    activated: bool,
    options: SessionOptions,
    events: Vec<EngineEvent>,
    notifications: Vec<Notification>,
}

impl ChatSession {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            messages: Vec::new(),
            id_counter: 0,
            input: String::new(),
            in_flight: None,
            next_token: 0,
            activated: false,
            options,
            events: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| &m.id == id)
    }

    pub fn state(&self) -> SessionState {
        if self.in_flight.is_some() {
            SessionState::Generating
        } else {
            SessionState::Idle
        }
    }

    pub fn is_generating(&self) -> bool {
        self.state() == SessionState::Generating
    }

    /// The pending input buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Placeholder text for the input surface, which is disabled while generating.
    pub fn input_hint(&self) -> &'static str {
        match self.state() {
            SessionState::Idle => IDLE_INPUT_HINT,
            SessionState::Generating => GENERATING_INPUT_HINT,
        }
    }

    /// Capture the current log and input state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.messages.clone(),
            state: self.state(),
            input: self.input.clone(),
            input_hint: self.input_hint(),
        }
    }

    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Seed the welcome message on first activation.
    ///
    /// Fires at most once per session and only while the log is empty.
    /// Returns whether a message was seeded.
    pub fn activate(&mut self) -> bool {
        if self.activated {
            return false;
        }
        self.activated = true;

        if !self.messages.is_empty() {
            return false;
        }

        let suggestions = self.options.welcome_suggestions.clone();
        let metadata = (!suggestions.is_empty()).then(|| ReplyMetadata {
            confidence: None,
            suggestions,
        });
        let welcome = self.options.welcome_message.clone();
        self.append(welcome, MessageKind::Assistant { metadata });
        true
    }

    /// Reset the log and id counter, then re-seed a single welcome message.
    ///
    /// Any outstanding generation is invalidated; its eventual resolution is
    /// discarded.
    pub fn clear(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            tracing::info!(token = in_flight.token.0, "clear invalidated outstanding generation");
        }
        self.messages.clear();
        self.id_counter = 0;
        self.activated = true;

        let welcome = self.options.welcome_message.clone();
        self.append(welcome, MessageKind::Assistant { metadata: None });
    }

    /// Accept a submission: append the user message and enter `Generating`.
    ///
    /// Returns `None` (and changes nothing) when the query is blank or a
    /// generation is already outstanding.
    pub fn begin_submit(&mut self, query: &str) -> Option<PendingGeneration> {
        if query.trim().is_empty() {
            tracing::debug!("ignoring blank submission");
            return None;
        }
        if self.is_generating() {
            tracing::debug!("ignoring submission while a generation is outstanding");
            return None;
        }

        self.append(query.to_string(), MessageKind::User);

        self.next_token += 1;
        let token = GenerationToken(self.next_token);
        self.in_flight = Some(InFlight {
            token,
            query: query.to_string(),
        });

        tracing::info!(token = token.0, "generation started");
        Some(PendingGeneration {
            token,
            request: GenerationRequest {
                user_query: query.to_string(),
                context_data: self.options.context_data.clone(),
            },
        })
    }

    /// Settle a generation attempt with its collaborator outcome.
    ///
    /// Appends exactly one assistant or error message for the current attempt,
    /// then returns to `Idle` and clears the input buffer. Resolutions for
    /// attempts invalidated by `clear()` are dropped.
    pub fn resolve(
        &mut self,
        token: GenerationToken,
        outcome: Result<GenerationResult, GenerationError>,
    ) -> SubmitOutcome {
        let in_flight = match self.in_flight.take() {
            Some(in_flight) if in_flight.token == token => in_flight,
            other => {
                self.in_flight = other;
                tracing::debug!(token = token.0, "discarding stale generation result");
                return SubmitOutcome::Discarded;
            }
        };

        let result = match outcome {
            Ok(result) => match result.artifact() {
                Some(artifact) => {
                    let artifact = artifact.to_string();
                    let metadata = ReplyMetadata {
                        confidence: result.confidence,
                        suggestions: result.suggestions.unwrap_or_default(),
                    };
                    let id = self.append(
                        artifact.clone(),
                        MessageKind::Assistant {
                            metadata: Some(metadata),
                        },
                    );
                    tracing::info!(token = token.0, "generation completed");
                    self.events.push(EngineEvent::Generated {
                        prompt: artifact,
                        user_query: in_flight.query,
                    });
                    SubmitOutcome::Generated(id)
                }
                None => {
                    tracing::warn!(token = token.0, "generation returned no artifact");
                    SubmitOutcome::Failed(
                        self.append(MISSING_ARTIFACT_MESSAGE.to_string(), MessageKind::Error),
                    )
                }
            },
            Err(err) => {
                let diagnostic = err.diagnostic();
                tracing::warn!(token = token.0, error = %diagnostic, "generation failed");
                SubmitOutcome::Failed(self.append(diagnostic, MessageKind::Error))
            }
        };

        self.input.clear();
        result
    }

    /// Submit `query` and await the generation collaborator.
    pub async fn submit(&mut self, generator: &dyn Generator, query: &str) -> SubmitOutcome {
        let Some(pending) = self.begin_submit(query) else {
            return SubmitOutcome::Ignored;
        };
        let outcome = generator.generate(pending.request).await;
        self.resolve(pending.token, outcome)
    }

    /// Submit the current contents of the input buffer.
    pub async fn submit_input(&mut self, generator: &dyn Generator) -> SubmitOutcome {
        let query = self.input.clone();
        self.submit(generator, &query).await
    }

    /// Handle a copy/edit/regenerate request from the message UI.
    pub async fn request_action(
        &mut self,
        action: MessageAction,
        message_id: &MessageId,
        generator: &dyn Generator,
        clipboard: &dyn Clipboard,
    ) -> ActionOutcome {
        self.events.push(EngineEvent::MessageAction {
            action,
            message_id: message_id.clone(),
        });

        match action {
            MessageAction::Copy => self.copy_message(message_id, clipboard),
            MessageAction::Edit => self.edit_message(message_id),
            MessageAction::Regenerate => self.regenerate(message_id, generator).await,
        }
    }

    /// Write a message's content to the clipboard and report the outcome.
    pub fn copy_message(&mut self, message_id: &MessageId, clipboard: &dyn Clipboard) -> ActionOutcome {
        let Some(message) = self.message(message_id) else {
            return ActionOutcome::Ignored;
        };

        match clipboard.write_text(&message.content) {
            Ok(()) => {
                self.notifications
                    .push(Notification::success("Copied!", "Message copied to clipboard"));
                ActionOutcome::Copied
            }
            Err(e) => {
                tracing::warn!(error = %e, message_id = %message_id, "copy failed");
                self.notifications
                    .push(Notification::error("Error", "Failed to copy message"));
                ActionOutcome::CopyFailed
            }
        }
    }

    /// Copy a user message back into the input buffer.
    pub fn edit_message(&mut self, message_id: &MessageId) -> ActionOutcome {
        match self.user_content(message_id) {
            Some(content) => {
                self.input = content;
                ActionOutcome::Edited
            }
            None => ActionOutcome::Ignored,
        }
    }

    /// Edit, then immediately resubmit the same content.
    pub async fn regenerate(
        &mut self,
        message_id: &MessageId,
        generator: &dyn Generator,
    ) -> ActionOutcome {
        let Some(content) = self.user_content(message_id) else {
            return ActionOutcome::Ignored;
        };
        self.input = content.clone();
        ActionOutcome::Regenerated(self.submit(generator, &content).await)
    }

    fn user_content(&self, message_id: &MessageId) -> Option<String> {
        self.message(message_id)
            .filter(|m| m.is_user())
            .map(|m| m.content.clone())
    }

    fn append(&mut self, content: String, kind: MessageKind) -> MessageId {
        self.id_counter += 1;
        let created_at = Utc::now();
        let id = MessageId::compose(self.id_counter, created_at);

        tracing::debug!(id = %id, role = ?kind, "appending message");
        self.messages.push(Message {
            id: id.clone(),
            created_at,
            content,
            kind,
        });
        self.events.push(EngineEvent::LogChanged {
            message_count: self.messages.len(),
        });
        id
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}
