//! Portable text export of a draft.

use super::draft::TemplateDraft;

const INSTRUCTIONS: &str = "\
1. Open your prompt builder and create a new prompt template
2. Paste the prompt content from above
3. Configure the template name, description, and variables as listed
4. Set the category and save your template";

/// Render a draft as a fixed-layout, human-readable block.
///
/// Pure and deterministic: structurally equal drafts render byte-identical
/// output.
pub fn format_for_export(draft: &TemplateDraft) -> String {
    let description = if draft.description.is_empty() {
        "No description provided"
    } else {
        draft.description.as_str()
    };
    let category = draft.category.map(|c| c.label()).unwrap_or("General");

    let variables = if draft.variables.is_empty() {
        "No variables detected".to_string()
    } else {
        draft
            .variables
            .iter()
            .map(|v| {
                if v.description.is_empty() {
                    format!("- {}", v.name)
                } else {
                    format!("- {}: {}", v.name, v.description)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "=== PROMPT TEMPLATE ===\n\
         Name: {}\n\
         Description: {}\n\
         Category: {}\n\
         \n\
         === PROMPT CONTENT ===\n\
         {}\n\
         \n\
         === VARIABLES ===\n\
         {}\n\
         \n\
         === INSTRUCTIONS ===\n\
         {}",
        draft.name, description, category, draft.content, variables, INSTRUCTIONS
    )
}
