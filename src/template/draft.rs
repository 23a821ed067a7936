//! Template draft model, categories, and validity rules.

use super::variables::TemplateVariable;
use serde::{Deserialize, Serialize};

/// Template categories offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Sales,
    CustomerService,
    Marketing,
    DataAnalysis,
    LeadQualification,
    FollowUp,
    Onboarding,
    Training,
    General,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Sales,
        Category::CustomerService,
        Category::Marketing,
        Category::DataAnalysis,
        Category::LeadQualification,
        Category::FollowUp,
        Category::Onboarding,
        Category::Training,
        Category::General,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Sales => "Sales",
            Category::CustomerService => "Customer Service",
            Category::Marketing => "Marketing",
            Category::DataAnalysis => "Data Analysis",
            Category::LeadQualification => "Lead Qualification",
            Category::FollowUp => "Follow-up",
            Category::Onboarding => "Onboarding",
            Category::Training => "Training",
            Category::General => "General",
        }
    }

    /// Stored value (kebab-case).
    pub fn value(&self) -> &'static str {
        match self {
            Category::Sales => "sales",
            Category::CustomerService => "customer-service",
            Category::Marketing => "marketing",
            Category::DataAnalysis => "data-analysis",
            Category::LeadQualification => "lead-qualification",
            Category::FollowUp => "follow-up",
            Category::Onboarding => "onboarding",
            Category::Training => "training",
            Category::General => "general",
        }
    }

    /// Parse a category from its stored value.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.value() == s)
    }
}

/// Whether a category must be chosen for a draft to be valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryPolicy {
    /// Category may be left empty (default).
    #[default]
    Optional,
    /// Category must be set.
    Required,
}

impl CategoryPolicy {
    /// Parse a category policy from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "optional" => Some(Self::Optional),
            "required" => Some(Self::Required),
            _ => None,
        }
    }
}

/// The in-progress, not-yet-saved template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub content: String,
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
}

impl TemplateDraft {
    /// Required fields that are still empty, in form order.
    pub fn missing_fields(&self, policy: CategoryPolicy) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.content.trim().is_empty() {
            missing.push("content");
        }
        if policy == CategoryPolicy::Required && self.category.is_none() {
            missing.push("category");
        }
        missing
    }

    pub fn is_valid(&self, policy: CategoryPolicy) -> bool {
        self.missing_fields(policy).is_empty()
    }

    /// Percentage of required fields that are filled.
    pub fn progress(&self, policy: CategoryPolicy) -> u8 {
        let required = match policy {
            CategoryPolicy::Optional => 2,
            CategoryPolicy::Required => 3,
        };
        let filled = required - self.missing_fields(policy).len();
        ((filled as f64 / required as f64) * 100.0).round() as u8
    }

    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            name: non_empty_or(&self.name, "Untitled Template"),
            description: non_empty_or(&self.description, "No description provided"),
            variable_count: self.variables.len(),
            category: self
                .category
                .map(|c| c.label().to_string())
                .unwrap_or_else(|| "Uncategorized".to_string()),
        }
    }
}

/// Display summary of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSummary {
    pub name: String,
    pub description: String,
    pub variable_count: usize,
    pub category: String,
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
