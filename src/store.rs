//! File-backed persistence for saved templates.
//!
//! Each template lives at `<templates_dir>/<template_id>.yaml` and is written
//! atomically. The store consumes the snapshot carried by a `TemplateSaved`
//! event; it never sees the live form.

use crate::error::{PromptsmithError, Result};
use crate::events::EngineEvent;
use crate::fs::atomic_write_file;
use crate::template::SavedTemplate;
use std::path::{Path, PathBuf};

/// Directory of YAML template documents.
#[derive(Debug, Clone)]
pub struct FileTemplateStore {
    dir: PathBuf,
}

impl FileTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a template with `template_id` is stored at.
    pub fn path_for(&self, template_id: &str) -> PathBuf {
        self.dir.join(format!("{}.yaml", template_id))
    }

    /// Write `template`, replacing any previous document with the same id.
    pub fn save(&self, template: &SavedTemplate) -> Result<PathBuf> {
        let yaml = serde_yaml::to_string(template).map_err(|e| {
            PromptsmithError::UserError(format!("failed to serialize template: {}", e))
        })?;

        let path = self.path_for(&template.template_id);
        atomic_write_file(&path, &yaml)?;
        tracing::info!(path = %path.display(), "template written");
        Ok(path)
    }

    /// Persist the payload of a `TemplateSaved` event; other events are ignored.
    pub fn handle_event(&self, event: &EngineEvent) -> Result<Option<PathBuf>> {
        match event {
            EngineEvent::TemplateSaved { template_data, .. } => self.save(template_data).map(Some),
            _ => Ok(None),
        }
    }

    pub fn load(&self, template_id: &str) -> Result<SavedTemplate> {
        let path = self.path_for(template_id);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            PromptsmithError::UserError(format!(
                "failed to read template '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            PromptsmithError::UserError(format!(
                "failed to parse template '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
