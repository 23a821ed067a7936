//! CLI argument parsing for promptsmith.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::template::Category;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Promptsmith: conversational prompt authoring.
///
/// Chat with a prompt generator, then turn its output into a reusable
/// template whose `{{placeholders}}` are tracked as variables.
#[derive(Parser, Debug)]
#[command(name = "promptsmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to ./promptsmith.yaml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for promptsmith.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat session with the prompt generator.
    ///
    /// Plain lines are submitted; an empty line submits the input buffer.
    /// Slash commands: /clear, /edit <id>, /regenerate <id>, /copy <id>, /quit.
    /// The first generated prompt becomes the template draft, managed with
    /// /vars, /template, /category <value>, /save <name> and /reset.
    Chat,

    /// Submit a single request and print the generated prompt.
    Generate(GenerateArgs),

    /// List the variables detected in a template file.
    Vars(VarsArgs),

    /// Print the export text block for a template file.
    Export(ExportArgs),

    /// Fill a template's placeholders with sample values.
    Preview(PreviewArgs),

    /// Validate a template and write it to the templates directory.
    Save(TemplateArgs),
}

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// What the prompt should do. Multiple words are joined with spaces.
    #[arg(required = true)]
    pub query: Vec<String>,
}

/// Arguments for the `vars` command.
#[derive(Args, Debug)]
pub struct VarsArgs {
    /// File holding the template content.
    pub file: PathBuf,

    /// Print the variable list as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Template metadata plus the content file.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// File holding the template content.
    pub file: PathBuf,

    /// Template name.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Template description.
    #[arg(long, default_value = "")]
    pub description: String,

    /// Category value (e.g., sales, customer-service, follow-up).
    #[arg(long, value_parser = parse_category)]
    pub category: Option<Category>,
}

/// Arguments for the `export` command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Also copy the export text to the clipboard.
    #[arg(long)]
    pub copy: bool,
}

/// Arguments for the `preview` command.
#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Sample value as `name=value`. Repeatable.
    #[arg(long = "set", value_parser = parse_assignment)]
    pub values: Vec<(String, String)>,
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_str(s).ok_or_else(|| {
        let known: Vec<&str> = Category::ALL.iter().map(|c| c.value()).collect();
        format!("unknown category '{}' (expected one of: {})", s, known.join(", "))
    })
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", s)),
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_chat() {
        let cli = Cli::try_parse_from(["promptsmith", "chat"]).unwrap();
        assert!(matches!(cli.command, Command::Chat));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_generate_joins_words() {
        let cli = Cli::try_parse_from(["promptsmith", "generate", "refund", "policy"]).unwrap();
        match cli.command {
            Command::Generate(args) => assert_eq!(args.query, vec!["refund", "policy"]),
            other => panic!("Expected Generate command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_generate_requires_query() {
        assert!(Cli::try_parse_from(["promptsmith", "generate"]).is_err());
    }

    #[test]
    fn test_parse_global_config_after_subcommand() {
        let cli =
            Cli::try_parse_from(["promptsmith", "vars", "t.txt", "--config", "alt.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.yaml")));
    }

    #[test]
    fn test_parse_save_full() {
        let cli = Cli::try_parse_from([
            "promptsmith",
            "save",
            "body.txt",
            "--name",
            "Follow up",
            "--description",
            "After a demo",
            "--category",
            "follow-up",
        ])
        .unwrap();
        match cli.command {
            Command::Save(args) => {
                assert_eq!(args.file, PathBuf::from("body.txt"));
                assert_eq!(args.name, "Follow up");
                assert_eq!(args.description, "After a demo");
                assert_eq!(args.category, Some(Category::FollowUp));
            }
            other => panic!("Expected Save command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_category_fails() {
        let result = Cli::try_parse_from([
            "promptsmith",
            "export",
            "body.txt",
            "--category",
            "gossip",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_preview_assignments() {
        let cli = Cli::try_parse_from([
            "promptsmith",
            "preview",
            "body.txt",
            "--name",
            "N",
            "--set",
            "name=Ada",
            "--set",
            "eta=2 days",
        ])
        .unwrap();
        match cli.command {
            Command::Preview(args) => assert_eq!(
                args.values,
                vec![
                    ("name".to_string(), "Ada".to_string()),
                    ("eta".to_string(), "2 days".to_string()),
                ]
            ),
            other => panic!("Expected Preview command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_assignment_rejects_missing_equals() {
        assert!(parse_assignment("name").is_err());
        assert!(parse_assignment("=value").is_err());
        assert_eq!(
            parse_assignment("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
    }
}
