//! Generation collaborator contract.
//!
//! The session controller treats generation as an opaque async call taking
//! `{userQuery, contextData}` and resolving to `{generatedPrompt, confidence?,
//! suggestions?}`. A rejection, or a result without an artifact, is a failure.
//!
//! - **Generator**: the trait the session calls
//! - **CommandGenerator**: runs an external command, JSON over stdin/stdout

mod command;

pub use command::CommandGenerator;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic used when a failure carries no readable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate prompt";

/// Diagnostic used when the collaborator resolves without an artifact.
pub const MISSING_ARTIFACT_MESSAGE: &str = "No response received from the generation service";

/// Request handed to the generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub user_query: String,
    /// Serialized JSON object with caller-supplied context.
    pub context_data: String,
}

/// Structured result from the generation collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    #[serde(default)]
    pub generated_prompt: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}

impl GenerationResult {
    /// Result carrying only an artifact.
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            generated_prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    /// The generated artifact, if present and non-empty.
    pub fn artifact(&self) -> Option<&str> {
        self.generated_prompt
            .as_deref()
            .filter(|prompt| !prompt.is_empty())
    }
}

/// Nested error body some collaborators attach to rejections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// A rejected generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub body: Option<ErrorBody>,
}

impl GenerationError {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            body: None,
        }
    }

    pub fn with_body_message(message: impl Into<String>) -> Self {
        Self {
            message: None,
            body: Some(ErrorBody {
                message: Some(message.into()),
            }),
        }
    }

    /// Best available human-readable diagnostic.
    ///
    /// `body.message` wins over `message`; blank strings count as absent.
    pub fn diagnostic(&self) -> String {
        let body_message = self
            .body
            .as_ref()
            .and_then(|body| body.message.as_deref())
            .filter(|m| !m.trim().is_empty());
        let message = self.message.as_deref().filter(|m| !m.trim().is_empty());

        body_message
            .or(message)
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
            .to_string()
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagnostic())
    }
}

impl std::error::Error for GenerationError {}

/// The external text-generation endpoint.
pub trait Generator: Send + Sync {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> BoxFuture<'_, Result<GenerationResult, GenerationError>>;
}
