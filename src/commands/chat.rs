//! Interactive chat loop.
//!
//! Every generated artifact is offered to a template form that lives for the
//! whole loop, so a reply can be named and saved without leaving the chat.

use super::save::save_form;
use super::{Outbox, io_error};
use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::error::{PromptsmithError, Result};
use crate::events::EngineEvent;
use crate::generation::Generator;
use crate::session::{ActionOutcome, ChatSession, MessageAction, MessageId, SessionOptions};
use crate::store::FileTemplateStore;
use crate::template::{Category, CategoryPolicy, TemplateForm};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// One line of chat input.
#[derive(Debug, PartialEq, Eq)]
enum ChatLine<'a> {
    Submit(&'a str),
    SubmitInput,
    Clear,
    Action(MessageAction, &'a str),
    Vars,
    Template,
    Category(&'a str),
    Save(&'a str),
    Reset,
    Quit,
    Unknown(&'a str),
}

impl<'a> ChatLine<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ChatLine::SubmitInput;
        }
        let Some(command) = trimmed.strip_prefix('/') else {
            return ChatLine::Submit(line);
        };

        let (name, rest) = command
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((command, ""));

        match (name, rest.is_empty()) {
            ("quit" | "exit", _) => ChatLine::Quit,
            ("clear", _) => ChatLine::Clear,
            ("vars", _) => ChatLine::Vars,
            ("template", _) => ChatLine::Template,
            ("reset", _) => ChatLine::Reset,
            ("category", false) => ChatLine::Category(rest),
            ("save", false) => ChatLine::Save(rest),
            _ => match MessageAction::from_str(name) {
                Some(action) if !rest.is_empty() => ChatLine::Action(action, rest),
                _ => ChatLine::Unknown(trimmed),
            },
        }
    }
}

/// Collaborators the chat loop drives.
pub(crate) struct ChatContext<'a> {
    pub generator: &'a dyn Generator,
    pub clipboard: &'a dyn Clipboard,
    pub outbox: &'a Outbox,
    pub store: &'a FileTemplateStore,
    pub policy: CategoryPolicy,
}

pub async fn cmd_chat(config: &Config) -> Result<()> {
    let generator = config.generator()?;
    let clipboard = config.clipboard()?;
    let outbox = Outbox::from_config(config);
    let store = FileTemplateStore::new(&config.templates_dir);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    let context = ChatContext {
        generator: &generator,
        clipboard: clipboard.as_ref(),
        outbox: &outbox,
        store: &store,
        policy: config.category_policy,
    };
    run_chat(config.session_options(), &context, stdin, &mut stdout).await
}

pub(crate) async fn run_chat<R, W>(
    options: SessionOptions,
    context: &ChatContext<'_>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = ChatSession::new(options);
    let mut form = TemplateForm::new(context.policy);
    let mut shown = 0;
    session.activate();
    flush(&mut session, &mut form, &mut shown, context.outbox, out)?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}\n> ", session.input_hint()).map_err(io_error)?;
        out.flush().map_err(io_error)?;

        let Some(line) = lines.next_line().await.map_err(|e| {
            PromptsmithError::UserError(format!("failed to read input: {}", e))
        })?
        else {
            break;
        };

        match ChatLine::parse(&line) {
            ChatLine::Quit => break,
            ChatLine::Clear => {
                session.clear();
                shown = 0;
            }
            ChatLine::Submit(text) => {
                session.submit(context.generator, text).await;
            }
            ChatLine::SubmitInput => {
                session.submit_input(context.generator).await;
            }
            ChatLine::Action(action, id) => {
                let outcome = session
                    .request_action(
                        action,
                        &MessageId::from(id),
                        context.generator,
                        context.clipboard,
                    )
                    .await;
                match outcome {
                    ActionOutcome::Ignored => {
                        writeln!(out, "no message '{}' accepts /{}", id, action)
                            .map_err(io_error)?;
                    }
                    ActionOutcome::Edited => {
                        writeln!(out, "input: {}", session.input()).map_err(io_error)?;
                    }
                    _ => {}
                }
            }
            ChatLine::Vars => {
                if form.variables().is_empty() {
                    writeln!(out, "No variables detected").map_err(io_error)?;
                }
                for variable in form.variables() {
                    writeln!(out, "{}", variable.name).map_err(io_error)?;
                }
            }
            ChatLine::Template => {
                writeln!(out, "{}", form.export_text()).map_err(io_error)?;
            }
            ChatLine::Category(value) => match Category::from_str(value) {
                Some(category) => form.set_category(Some(category)),
                None => writeln!(out, "unknown category: {}", value).map_err(io_error)?,
            },
            ChatLine::Save(name) => {
                form.set_name(name);
                // Failures are reported through the form's notifications.
                if let Ok(path) = save_form(&mut form, context.store, context.outbox) {
                    writeln!(out, "saved {}", path.display()).map_err(io_error)?;
                }
            }
            ChatLine::Reset => form.reset(),
            ChatLine::Unknown(command) => {
                writeln!(out, "unknown command: {}", command).map_err(io_error)?;
            }
        }

        flush(&mut session, &mut form, &mut shown, context.outbox, out)?;
    }

    Ok(())
}

/// Print messages appended since the last flush, hand generated artifacts to
/// the form, and drain both outboxes.
fn flush<W: Write>(
    session: &mut ChatSession,
    form: &mut TemplateForm,
    shown: &mut usize,
    outbox: &Outbox,
    out: &mut W,
) -> Result<()> {
    for message in &session.messages()[*shown..] {
        writeln!(out, "[{}] {}: {}", message.id, message.role(), message.content)
            .map_err(io_error)?;
        if let Some(metadata) = message.metadata() {
            for suggestion in &metadata.suggestions {
                writeln!(out, "    - {}", suggestion).map_err(io_error)?;
            }
        }
    }
    *shown = session.messages().len();

    let events = session.take_events();
    for event in &events {
        if let EngineEvent::Generated { prompt, .. } = event
            && form.receive_artifact(prompt)
        {
            tracing::debug!(variables = form.variables().len(), "artifact loaded into template");
        }
    }
    outbox.publish(events)?;
    outbox.publish(form.take_events())?;
    outbox.notify(session.take_notifications());
    outbox.notify(form.take_notifications());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationResult;
    use crate::test_support::{RecordingClipboard, ScriptedGenerator};
    use tempfile::TempDir;

    struct ChatRun {
        out: String,
        events: String,
        temp_dir: TempDir,
    }

    async fn run_script(
        script: &str,
        generator: &ScriptedGenerator,
        policy: CategoryPolicy,
    ) -> ChatRun {
        let temp_dir = TempDir::new().unwrap();
        let events_path = temp_dir.path().join("events.ndjson");
        let outbox = Outbox::to_file(&events_path);
        let store = FileTemplateStore::new(temp_dir.path().join("templates"));
        let clipboard = RecordingClipboard::new();
        let mut out = Vec::new();

        let context = ChatContext {
            generator,
            clipboard: &clipboard,
            outbox: &outbox,
            store: &store,
            policy,
        };
        run_chat(
            SessionOptions::default(),
            &context,
            script.as_bytes(),
            &mut out,
        )
        .await
        .unwrap();

        ChatRun {
            out: String::from_utf8(out).unwrap(),
            events: std::fs::read_to_string(&events_path).unwrap_or_default(),
            temp_dir,
        }
    }

    fn saved_templates(run: &ChatRun) -> Vec<String> {
        let dir = run.temp_dir.path().join("templates");
        match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .map(|entry| std::fs::read_to_string(entry.unwrap().path()).unwrap())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    #[test]
    fn test_parse_chat_lines() {
        assert_eq!(ChatLine::parse("write a prompt"), ChatLine::Submit("write a prompt"));
        assert_eq!(ChatLine::parse("   "), ChatLine::SubmitInput);
        assert_eq!(ChatLine::parse("/clear"), ChatLine::Clear);
        assert_eq!(ChatLine::parse("/quit"), ChatLine::Quit);
        assert_eq!(
            ChatLine::parse("/copy msg_2_1"),
            ChatLine::Action(MessageAction::Copy, "msg_2_1")
        );
        assert_eq!(ChatLine::parse("/copy"), ChatLine::Unknown("/copy"));
        assert_eq!(ChatLine::parse("/dance now"), ChatLine::Unknown("/dance now"));
        assert_eq!(ChatLine::parse("/save Order ready "), ChatLine::Save("Order ready"));
        assert_eq!(ChatLine::parse("/save"), ChatLine::Unknown("/save"));
        assert_eq!(ChatLine::parse("/category sales"), ChatLine::Category("sales"));
        assert_eq!(ChatLine::parse("/vars"), ChatLine::Vars);
        assert_eq!(ChatLine::parse("/template"), ChatLine::Template);
        assert_eq!(ChatLine::parse("/reset"), ChatLine::Reset);
    }

    #[tokio::test]
    async fn test_chat_submits_and_prints_reply() {
        let generator = ScriptedGenerator::replying("You are a refunds assistant.");

        let run = run_script("refund prompt\n/quit\n", &generator, CategoryPolicy::Optional).await;

        assert!(run.out.contains("assistant: Hello!"));
        assert!(run.out.contains("user: refund prompt"));
        assert!(run.out.contains("assistant: You are a refunds assistant."));
        assert_eq!(generator.requests()[0].user_query, "refund prompt");
        assert!(run.events.contains(r#""event":"generated""#));
    }

    #[tokio::test]
    async fn test_chat_clear_reprints_welcome() {
        let generator = ScriptedGenerator::replying("ok");

        let run = run_script("hello\n/clear\n", &generator, CategoryPolicy::Optional).await;

        assert_eq!(run.out.matches("assistant: Hello!").count(), 2);
        assert!(run.out.contains("[msg_1_"));
    }

    #[tokio::test]
    async fn test_chat_unknown_action_target() {
        let generator = ScriptedGenerator::new();

        let run = run_script("/edit msg_9_0\n", &generator, CategoryPolicy::Optional).await;

        assert!(run.out.contains("no message 'msg_9_0' accepts /edit"));
        assert!(run.events.contains(r#""event":"message_action""#));
        assert!(generator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_generated_artifact_flows_into_saved_template() {
        let generator =
            ScriptedGenerator::replying("Hello {{name}}, your {{order_id}} is ready. {{name}} again");

        let run = run_script(
            "order ready prompt\n/vars\n/save Order ready\n",
            &generator,
            CategoryPolicy::Optional,
        )
        .await;

        assert!(run.out.contains("name\norder_id\n"));
        assert!(run.out.contains("saved "));
        assert!(run.events.contains(r#""event":"template_saved""#));

        let saved = saved_templates(&run);
        assert_eq!(saved.len(), 1);
        assert!(saved[0].contains("name: Order ready"));
        assert!(saved[0].contains("name: order_id"));
    }

    #[tokio::test]
    async fn test_later_artifacts_do_not_replace_loaded_draft() {
        let generator = ScriptedGenerator::new();
        generator.push_ok(GenerationResult::with_prompt("First {{a}}"));
        generator.push_ok(GenerationResult::with_prompt("Second {{b}}"));

        let run = run_script(
            "one\ntwo\n/vars\n/reset\n/vars\n",
            &generator,
            CategoryPolicy::Optional,
        )
        .await;

        let first = run.out.find("> a\n").unwrap();
        let second = run.out.find("> b\n").unwrap();
        assert!(first < second);
        assert_eq!(run.out.matches("> b\n").count(), 1);
    }

    #[tokio::test]
    async fn test_save_respects_required_category() {
        let generator = ScriptedGenerator::replying("Ask {{company}} about budget");

        let run = run_script(
            "qualify\n/save Qualify\n/category lead-qualification\n/save Qualify\n",
            &generator,
            CategoryPolicy::Required,
        )
        .await;

        assert_eq!(run.out.matches("saved ").count(), 1);
        let saved = saved_templates(&run);
        assert_eq!(saved.len(), 1);
        assert!(saved[0].contains("category: lead-qualification"));
    }
}
