//! Command implementations for promptsmith.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the plumbing every command shares: forwarding
//! drained engine events to the NDJSON log and printing notifications.

mod chat;
mod generate;
mod save;
mod template;
mod vars;

use crate::cli::{Command, TemplateArgs};
use crate::config::Config;
use crate::error::{PromptsmithError, Result};
use crate::events::{EngineEvent, Event, append_event};
use crate::notify::Notification;
use crate::template::{CategoryPolicy, TemplateForm};
use std::path::{Path, PathBuf};

/// Dispatch a command to its implementation.
pub async fn dispatch(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Chat => chat::cmd_chat(config).await,
        Command::Generate(args) => generate::cmd_generate(args, config).await,
        Command::Vars(args) => vars::cmd_vars(args),
        Command::Export(args) => template::cmd_export(args, config),
        Command::Preview(args) => template::cmd_preview(args, config),
        Command::Save(args) => save::cmd_save(args, config),
    }
}

/// Where drained engine events go.
#[derive(Debug, Clone, Default)]
pub(crate) struct Outbox {
    events_path: Option<PathBuf>,
}

impl Outbox {
    pub(crate) fn from_config(config: &Config) -> Self {
        Self {
            events_path: config.events_path(),
        }
    }

    #[cfg(test)]
    pub(crate) fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            events_path: Some(path.into()),
        }
    }

    /// Append each event to the events log, when one is configured.
    pub(crate) fn publish(&self, events: Vec<EngineEvent>) -> Result<()> {
        for event in events {
            tracing::debug!(event = event.kind(), "engine event");
            if let Some(path) = &self.events_path {
                append_event(path, &Event::new(event))?;
            }
        }
        Ok(())
    }

    /// Print notifications to stderr, one per line.
    pub(crate) fn notify(&self, notifications: Vec<Notification>) {
        for notification in notifications {
            eprintln!("{}", notification);
        }
    }
}

pub(crate) fn read_template_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        PromptsmithError::UserError(format!(
            "failed to read template file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Build a form from CLI metadata and a content file.
pub(crate) fn load_form(args: &TemplateArgs, policy: CategoryPolicy) -> Result<TemplateForm> {
    let content = read_template_file(&args.file)?;

    let mut form = TemplateForm::new(policy);
    form.set_name(args.name.as_str());
    form.set_description(args.description.as_str());
    form.set_category(args.category);
    form.set_content(content);
    Ok(form)
}

pub(crate) fn io_error(e: std::io::Error) -> PromptsmithError {
    PromptsmithError::UserError(format!("failed to write output: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Category;
    use tempfile::TempDir;

    #[test]
    fn test_outbox_appends_one_line_per_event() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("events.ndjson");
        let outbox = Outbox::to_file(&path);

        outbox
            .publish(vec![
                EngineEvent::LogChanged { message_count: 1 },
                EngineEvent::LogChanged { message_count: 2 },
            ])
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains(r#""event":"log_changed""#));
        assert!(lines[1].contains(r#""messageCount":2"#));
    }

    #[test]
    fn test_outbox_without_path_drops_events() {
        Outbox::default()
            .publish(vec![EngineEvent::LogChanged { message_count: 1 }])
            .unwrap();
    }

    #[test]
    fn test_load_form_applies_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("body.txt");
        std::fs::write(&file, "Hi {{name}}").unwrap();

        let args = TemplateArgs {
            file,
            name: "Greeting".to_string(),
            description: String::new(),
            category: Some(Category::Onboarding),
        };
        let form = load_form(&args, CategoryPolicy::Required).unwrap();

        assert!(form.is_valid());
        assert_eq!(form.variables()[0].name, "name");
        assert_eq!(form.draft().category, Some(Category::Onboarding));
    }

    #[test]
    fn test_load_form_missing_file() {
        let args = TemplateArgs {
            file: PathBuf::from("/nonexistent/body.txt"),
            name: String::new(),
            description: String::new(),
            category: None,
        };
        let err = load_form(&args, CategoryPolicy::Optional).unwrap_err();
        assert!(err.to_string().contains("failed to read template file"));
    }
}
