//! One-shot generation.

use super::Outbox;
use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::{PromptsmithError, Result};
use crate::generation::Generator;
use crate::session::{ChatSession, MessageId, SessionOptions, SubmitOutcome};

pub async fn cmd_generate(args: GenerateArgs, config: &Config) -> Result<()> {
    let generator = config.generator()?;
    let outbox = Outbox::from_config(config);
    let query = args.query.join(" ");

    let prompt = generate_once(config.session_options(), &generator, &outbox, &query).await?;
    println!("{}", prompt);
    Ok(())
}

/// Run a single submission through a fresh session.
///
/// Returns the artifact, or the error message the session recorded.
pub(crate) async fn generate_once(
    options: SessionOptions,
    generator: &dyn Generator,
    outbox: &Outbox,
    query: &str,
) -> Result<String> {
    let mut session = ChatSession::new(options);
    let outcome = session.submit(generator, query).await;
    outbox.publish(session.take_events())?;

    match outcome {
        SubmitOutcome::Generated(id) => Ok(content_of(&session, &id)),
        SubmitOutcome::Failed(id) => Err(PromptsmithError::GenerationFailure(content_of(
            &session, &id,
        ))),
        SubmitOutcome::Ignored => Err(PromptsmithError::EmptyInput),
        SubmitOutcome::Discarded => Err(PromptsmithError::GenerationFailure(
            "generation was cancelled".to_string(),
        )),
    }
}

fn content_of(session: &ChatSession, id: &MessageId) -> String {
    session
        .message(id)
        .map(|m| m.content.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{GenerationError, GenerationResult, MISSING_ARTIFACT_MESSAGE};
    use crate::test_support::ScriptedGenerator;

    #[tokio::test]
    async fn test_generate_once_returns_artifact() {
        let generator = ScriptedGenerator::replying("You are a sales coach.");

        let prompt = generate_once(
            SessionOptions::default(),
            &generator,
            &Outbox::default(),
            "sales coaching",
        )
        .await
        .unwrap();

        assert_eq!(prompt, "You are a sales coach.");
        assert_eq!(generator.requests()[0].context_data, "{}");
    }

    #[tokio::test]
    async fn test_generate_once_surfaces_body_message() {
        let generator =
            ScriptedGenerator::failing(GenerationError::with_body_message("rate limited"));

        let err = generate_once(SessionOptions::default(), &generator, &Outbox::default(), "x")
            .await
            .unwrap_err();

        assert_eq!(err, PromptsmithError::GenerationFailure("rate limited".to_string()));
        assert_eq!(err.exit_code(), crate::exit_codes::GENERATION_FAILURE);
    }

    #[tokio::test]
    async fn test_generate_once_without_artifact_fails() {
        let generator = ScriptedGenerator::new();
        generator.push_ok(GenerationResult::default());

        let err = generate_once(SessionOptions::default(), &generator, &Outbox::default(), "x")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            PromptsmithError::GenerationFailure(MISSING_ARTIFACT_MESSAGE.to_string())
        );
    }

    #[tokio::test]
    async fn test_generate_once_blank_query() {
        let generator = ScriptedGenerator::new();

        let err = generate_once(SessionOptions::default(), &generator, &Outbox::default(), "  ")
            .await
            .unwrap_err();

        assert_eq!(err, PromptsmithError::EmptyInput);
        assert!(generator.requests().is_empty());
    }
}
