//! Template synchronizer.
//!
//! This module provides:
//!
//! - **Variables**: `{{identifier}}` scanning and the monotonic variable merge
//! - **Draft**: the editable template, its categories and validity policy
//! - **Export**: the deterministic text block used for copy/export
//! - **Form**: the stateful synchronizer tying these together, plus the
//!   save hand-off
//!
//! # Placeholder Syntax
//!
//! ```text
//! Hello {{customer_name}}, your order {{order_id}} has shipped.
//! ```
//!
//! Identifiers are ASCII letters, digits, and underscores. Anything else
//! between the braces is plain text.

mod draft;
mod export;
mod form;
mod variables;


pub use draft::{Category, CategoryPolicy, TemplateDraft, TemplateSummary};
pub use export::format_for_export;
pub use form::{SavedTemplate, TemplateForm};
pub use variables::{TemplateVariable, extract_placeholders, fill_placeholders, sync_variables};
