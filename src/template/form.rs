//! Template form: the editable draft kept in sync with its content.

use super::draft::{Category, CategoryPolicy, TemplateDraft, TemplateSummary};
use super::export::format_for_export;
use super::variables::{TemplateVariable, fill_placeholders, sync_variables};
use crate::clipboard::Clipboard;
use crate::error::{PromptsmithError, Result};
use crate::events::EngineEvent;
use crate::notify::Notification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Draft snapshot handed to the persistence collaborator.
///
/// Owns its data; later edits to the live form cannot reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTemplate {
    pub template_id: String,
    pub saved_at: DateTime<Utc>,
    #[serde(flatten)]
    pub template: TemplateDraft,
}

/// Owns the editable [`TemplateDraft`] and its derived state.
///
/// Every content edit re-runs the variable merge; every field edit
/// recomputes validity.
#[derive(Debug, Clone)]
pub struct TemplateForm {
    draft: TemplateDraft,
    seed: String,
    policy: CategoryPolicy,
    valid: bool,
    events: Vec<EngineEvent>,
    notifications: Vec<Notification>,
}

impl TemplateForm {
    pub fn new(policy: CategoryPolicy) -> Self {
        Self::seeded(policy, "")
    }

    /// A form whose content starts as `seed`, e.g. a generated artifact.
    pub fn seeded(policy: CategoryPolicy, seed: impl Into<String>) -> Self {
        let mut form = Self {
            draft: TemplateDraft::default(),
            seed: seed.into(),
            policy,
            valid: false,
            events: Vec::new(),
            notifications: Vec::new(),
        };
        form.initialize();
        form
    }

    /// A form pre-filled from an existing draft (e.g. loaded from disk).
    pub fn from_draft(policy: CategoryPolicy, draft: TemplateDraft) -> Self {
        let mut form = Self::new(policy);
        let content = draft.content.clone();
        form.draft = draft;
        form.set_content(content);
        form
    }

    pub fn draft(&self) -> &TemplateDraft {
        &self.draft
    }

    pub fn variables(&self) -> &[TemplateVariable] {
        &self.draft.variables
    }

    pub fn policy(&self) -> CategoryPolicy {
        self.policy
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.draft.missing_fields(self.policy)
    }

    pub fn progress(&self) -> u8 {
        self.draft.progress(self.policy)
    }

    pub fn summary(&self) -> TemplateSummary {
        self.draft.summary()
    }

    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.validate();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.validate();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.draft.category = category;
        self.validate();
    }

    /// Replace the content, merge new placeholders, and revalidate.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
        self.validate();
        self.draft.variables = sync_variables(&self.draft.variables, &self.draft.content);
    }

    /// Take a generated artifact as content while the draft has none.
    ///
    /// The latest artifact always becomes the seed that [`reset`](Self::reset)
    /// restores, so later artifacts never clobber user edits but are not lost.
    /// Returns whether the artifact was applied to the content.
    pub fn receive_artifact(&mut self, artifact: &str) -> bool {
        if artifact.is_empty() {
            return false;
        }
        self.seed = artifact.to_string();
        if !self.draft.content.is_empty() {
            return false;
        }
        self.set_content(artifact);
        true
    }

    /// Add a variable by hand. Names must be non-empty and unique.
    pub fn add_variable(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.draft.variables.iter().any(|v| v.name == name) {
            return false;
        }
        self.draft.variables.push(TemplateVariable::new(name));
        true
    }

    pub fn set_variable_description(&mut self, index: usize, description: impl Into<String>) -> bool {
        match self.draft.variables.get_mut(index) {
            Some(variable) => {
                variable.description = description.into();
                true
            }
            None => false,
        }
    }

    /// Remove the variable at `index`. The only way the list shrinks.
    pub fn remove_variable(&mut self, index: usize) -> Option<TemplateVariable> {
        (index < self.draft.variables.len()).then(|| self.draft.variables.remove(index))
    }

    /// Restore the initial draft (the seed, if any, becomes the content again).
    pub fn reset(&mut self) {
        self.initialize();
        self.notifications
            .push(Notification::info("Info", "Form reset to default values"));
    }

    pub fn export_text(&self) -> String {
        format_for_export(&self.draft)
    }

    /// Fill placeholders with sample values.
    pub fn preview(&self, values: &HashMap<String, String>) -> Result<String> {
        let missing: Vec<String> = self
            .draft
            .missing_fields(CategoryPolicy::Optional)
            .into_iter()
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(PromptsmithError::ValidationError(missing));
        }
        Ok(fill_placeholders(&self.draft.content, values))
    }

    /// Copy the exported text to the clipboard.
    pub fn copy_template(&mut self, clipboard: &dyn Clipboard) -> Result<String> {
        self.require_valid()?;

        let text = self.export_text();
        if let Err(e) = clipboard.write_text(&text) {
            tracing::warn!(error = %e, "template copy failed");
            self.notifications.push(Notification::error(
                "Error",
                "Failed to copy template to clipboard",
            ));
            return Err(e);
        }

        self.notifications.push(Notification::success(
            "Success",
            "Template content copied to clipboard!",
        ));
        self.events.push(EngineEvent::TemplateCopied {
            template_name: self.draft.name.clone(),
            template_content: text.clone(),
        });
        Ok(text)
    }

    /// Hand a snapshot of a valid draft off for persistence.
    ///
    /// On success the form is reset to an empty draft. On failure the draft
    /// is left untouched.
    pub fn save(&mut self) -> Result<SavedTemplate> {
        self.require_valid()?;

        let saved = SavedTemplate {
            template_id: Uuid::now_v7().to_string(),
            saved_at: Utc::now(),
            template: self.draft.clone(),
        };

        tracing::info!(template_id = %saved.template_id, name = %saved.template.name, "template saved");
        self.events.push(EngineEvent::TemplateSaved {
            template_id: saved.template_id.clone(),
            template_data: saved.clone(),
        });
        self.notifications.push(Notification::success(
            "Saved",
            format!("Template '{}' saved", saved.template.name),
        ));

        self.seed.clear();
        self.initialize();
        Ok(saved)
    }

    fn require_valid(&mut self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }

        tracing::warn!(missing = ?missing, "template draft is invalid");
        self.notifications.push(Notification::error(
            "Error",
            "Please fill in all required fields",
        ));
        Err(PromptsmithError::ValidationError(
            missing.into_iter().map(String::from).collect(),
        ))
    }

    fn initialize(&mut self) {
        self.draft = TemplateDraft::default();
        let seed = self.seed.clone();
        self.set_content(seed);
    }

    fn validate(&mut self) {
        self.valid = self.draft.is_valid(self.policy);
    }
}
