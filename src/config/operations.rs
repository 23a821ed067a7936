//! Config loading, validation, and collaborator construction.

use super::model::Config;
use super::types::DEFAULT_CONFIG_FILE;
use crate::clipboard::{Clipboard, CommandClipboard, NoClipboard};
use crate::error::{PromptsmithError, Result};
use crate::generation::CommandGenerator;
use crate::session::SessionOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PromptsmithError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the config for a CLI invocation.
    ///
    /// An explicit path must exist. Without one, `promptsmith.yaml` in the
    /// working directory is used when present, defaults otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    tracing::debug!("no config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            PromptsmithError::UserError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            PromptsmithError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `generator_timeout_seconds` must be positive
    /// - `context` must be a JSON object
    /// - `welcome_message` must be non-empty
    /// - `templates_dir` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.generator_timeout_seconds == 0 {
            return Err(PromptsmithError::UserError(
                "config validation failed: generator_timeout_seconds must be greater than 0"
                    .to_string(),
            ));
        }

        if !self.context.is_object() {
            return Err(PromptsmithError::UserError(
                "config validation failed: context must be a mapping".to_string(),
            ));
        }

        if self.welcome_message.trim().is_empty() {
            return Err(PromptsmithError::UserError(
                "config validation failed: welcome_message must be non-empty".to_string(),
            ));
        }

        if self.templates_dir.trim().is_empty() {
            return Err(PromptsmithError::UserError(
                "config validation failed: templates_dir must be non-empty".to_string(),
            ));
        }

        Ok(())
    }

    /// `context` serialized as the `contextData` string.
    pub fn context_data(&self) -> String {
        self.context.to_string()
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            welcome_message: self.welcome_message.clone(),
            welcome_suggestions: self.welcome_suggestions.clone(),
            context_data: self.context_data(),
        }
    }

    pub fn generator(&self) -> Result<CommandGenerator> {
        CommandGenerator::from_command_line(
            &self.generator_command,
            Duration::from_secs(self.generator_timeout_seconds),
        )
    }

    pub fn clipboard(&self) -> Result<Box<dyn Clipboard>> {
        if self.clipboard_command.trim().is_empty() {
            Ok(Box::new(NoClipboard))
        } else {
            Ok(Box::new(CommandClipboard::from_command_line(
                &self.clipboard_command,
            )?))
        }
    }

    /// Events file path, or `None` when event logging is disabled.
    pub fn events_path(&self) -> Option<PathBuf> {
        let trimmed = self.events_file.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }
}
