//! Validate a template and persist it.

use super::{Outbox, load_form};
use crate::cli::TemplateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::store::FileTemplateStore;
use crate::template::TemplateForm;
use std::path::PathBuf;

pub fn cmd_save(args: TemplateArgs, config: &Config) -> Result<()> {
    let mut form = load_form(&args, config.category_policy)?;
    let store = FileTemplateStore::new(&config.templates_dir);
    let outbox = Outbox::from_config(config);

    let path = save_form(&mut form, &store, &outbox)?;
    println!("{}", path.display());
    Ok(())
}

/// Hand the form's snapshot to the store, then forward its events.
pub(crate) fn save_form(
    form: &mut TemplateForm,
    store: &FileTemplateStore,
    outbox: &Outbox,
) -> Result<PathBuf> {
    let result = form.save();
    outbox.notify(form.take_notifications());
    let saved = result?;

    let events = form.take_events();
    let mut written = None;
    for event in &events {
        if let Some(path) = store.handle_event(event)? {
            written = Some(path);
        }
    }
    outbox.publish(events)?;

    Ok(written.unwrap_or_else(|| store.path_for(&saved.template_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptsmithError;
    use crate::template::{Category, CategoryPolicy};
    use tempfile::TempDir;

    #[test]
    fn test_save_form_writes_template_and_event() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTemplateStore::new(temp_dir.path().join("templates"));
        let events_path = temp_dir.path().join("events.ndjson");

        let mut form = TemplateForm::new(CategoryPolicy::Required);
        form.set_name("Qualify lead");
        form.set_category(Some(Category::LeadQualification));
        form.set_content("Ask {{company}} about budget");

        let path = save_form(&mut form, &store, &Outbox::to_file(&events_path)).unwrap();

        let yaml = std::fs::read_to_string(&path).unwrap();
        assert!(yaml.contains("name: Qualify lead"));
        let events = std::fs::read_to_string(&events_path).unwrap();
        assert!(events.contains(r#""event":"template_saved""#));
        assert!(events.contains(r#""templateData""#));
    }

    #[test]
    fn test_save_form_invalid_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let templates = temp_dir.path().join("templates");
        let store = FileTemplateStore::new(&templates);

        let mut form = TemplateForm::new(CategoryPolicy::Optional);
        form.set_content("No name");

        let err = save_form(&mut form, &store, &Outbox::default()).unwrap_err();

        assert_eq!(err, PromptsmithError::ValidationError(vec!["name".to_string()]));
        assert!(!templates.exists());
    }
}
