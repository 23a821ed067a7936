//! Placeholder scanning and the variable-list merge.
//!
//! Placeholders are `{{identifier}}` where the identifier is one or more
//! ASCII word characters. The merge is monotonic: content edits can only add
//! variables, never remove, rename, reorder, or overwrite descriptions.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use uuid::Uuid;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is valid")
});

/// One user-editable template variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVariable {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl TemplateVariable {
    /// A new variable with a fresh id and an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: format!("var_{}", Uuid::now_v7().simple()),
            name: name.into(),
            description: String::new(),
        }
    }
}

/// Distinct placeholder identifiers in first-occurrence order.
pub fn extract_placeholders(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PLACEHOLDER
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Merge the placeholders found in `content` into `existing`.
///
/// Existing entries are kept untouched and in order; each placeholder without
/// an entry of the same name is appended with an empty description.
pub fn sync_variables(existing: &[TemplateVariable], content: &str) -> Vec<TemplateVariable> {
    let mut merged = existing.to_vec();
    for name in extract_placeholders(content) {
        if !merged.iter().any(|v| v.name == name) {
            tracing::debug!(variable = %name, "new template variable detected");
            merged.push(TemplateVariable::new(name));
        }
    }
    merged
}

/// Replace placeholders that have a value in `values`; leave the rest intact.
pub fn fill_placeholders(content: &str, values: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(content, |caps: &Captures<'_>| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(vars: &[TemplateVariable]) -> Vec<&str> {
        vars.iter().map(|v| v.name.as_str()).collect()
    }

    #[test]
    fn test_extract_distinct_in_first_occurrence_order() {
        let found = extract_placeholders("Hello {{name}}, your {{order_id}} is ready. {{name}} again");
        assert_eq!(found, vec!["name", "order_id"]);
    }

    #[test]
    fn test_extract_ignores_malformed_tokens() {
        let found = extract_placeholders("{name} {{ spaced }} {{}} {{dash-ed}} {{ok_1}}");
        assert_eq!(found, vec!["ok_1"]);
    }

    #[test]
    fn test_extract_handles_extra_braces() {
        assert_eq!(extract_placeholders("{{{account}}}"), vec!["account"]);
        assert_eq!(extract_placeholders("{{a}}{{b}}"), vec!["a", "b"]);
    }

    #[test]
    fn test_extract_empty_content() {
        assert!(extract_placeholders("").is_empty());
        assert!(extract_placeholders("no tokens here").is_empty());
    }

    #[test]
    fn test_sync_scenario_creates_each_variable_once() {
        let vars = sync_variables(&[], "Hello {{name}}, your {{order_id}} is ready. {{name}} again");
        assert_eq!(names(&vars), vec!["name", "order_id"]);
        assert!(vars.iter().all(|v| v.description.is_empty()));
        assert_ne!(vars[0].id, vars[1].id);
        assert!(vars[0].id.starts_with("var_"));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let content = "{{a}} {{b}} {{a}}";
        let once = sync_variables(&[], content);
        let twice = sync_variables(&once, content);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sync_preserves_descriptions_and_stale_entries() {
        let mut vars = sync_variables(&[], "Dear {{customer}}, re: {{case}}");
        vars[0].description = "Customer first name".to_string();

        let vars = sync_variables(&vars, "Dear {{client}}");

        assert_eq!(names(&vars), vec!["customer", "case", "client"]);
        assert_eq!(vars[0].description, "Customer first name");
    }

    #[test]
    fn test_sync_growth_is_monotonic_across_edits() {
        let edits = ["{{a", "{{a}}", "{{a}} {{b}}", "{{b}}", "", "{{c}} {{a}}"];
        let mut vars = Vec::new();
        let mut previous = 0;
        for edit in edits {
            vars = sync_variables(&vars, edit);
            assert!(vars.len() >= previous);
            previous = vars.len();
        }
        assert_eq!(names(&vars), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_fill_placeholders_leaves_unknown_tokens() {
        let values = HashMap::from([("name".to_string(), "Ada".to_string())]);
        let filled = fill_placeholders("Hi {{name}}, order {{order_id}}. Bye {{name}}", &values);
        assert_eq!(filled, "Hi Ada, order {{order_id}}. Bye Ada");
    }
}
