//! Generator backed by an external command.
//!
//! The request is written to the command's stdin as JSON. On exit code 0,
//! stdout is either a JSON `GenerationResult` or plain text taken as the
//! artifact. On a non-zero exit, stderr is parsed as a JSON `GenerationError`
//! when possible and used as the plain message otherwise.

use super::{GenerationError, GenerationRequest, GenerationResult, Generator};
use crate::error::{PromptsmithError, Result};
use futures::future::BoxFuture;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs a configured command for every generation request.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandGenerator {
    /// Parse a command line (shell-words quoting rules).
    pub fn from_command_line(command: &str, timeout: Duration) -> Result<Self> {
        let mut parts = shell_words::split(command).map_err(|e| {
            PromptsmithError::UserError(format!(
                "failed to parse generator command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                command, e
            ))
        })?;

        if parts.is_empty() {
            return Err(PromptsmithError::UserError(
                "generator_command is empty; set it in the config file".to_string(),
            ));
        }

        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
            timeout,
        })
    }

    async fn run(&self, request: GenerationRequest) -> std::result::Result<GenerationResult, GenerationError> {
        let payload = serde_json::to_vec(&request)
            .map_err(|e| GenerationError::message(format!("failed to encode request: {}", e)))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                GenerationError::message(format!(
                    "failed to execute generator '{}': {}",
                    self.program, e
                ))
            })?;

        // The write runs alongside the output readers so a child that fills
        // stdout before draining stdin cannot stall it, and the whole
        // exchange sits under the timeout.
        let stdin = child.stdin.take();
        let write = async move {
            if let Some(mut stdin) = stdin {
                // Commands that ignore stdin may close it early.
                if let Err(e) = stdin.write_all(&payload).await {
                    tracing::debug!(error = %e, "generator did not consume request payload");
                }
            }
        };
        let exchange = async move {
            let ((), output) = tokio::join!(write, child.wait_with_output());
            output
        };

        let output = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(GenerationError::message(format!(
                    "failed to wait for generator: {}",
                    e
                )));
            }
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "generator timed out");
                return Err(GenerationError::message(format!(
                    "generation timed out after {:.1} seconds",
                    self.timeout.as_secs_f64()
                )));
            }
        };

        if output.status.success() {
            parse_stdout(&String::from_utf8_lossy(&output.stdout))
        } else {
            Err(parse_stderr(
                &String::from_utf8_lossy(&output.stderr),
                output.status.code(),
            ))
        }
    }
}

impl Generator for CommandGenerator {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> BoxFuture<'_, std::result::Result<GenerationResult, GenerationError>> {
        Box::pin(self.run(request))
    }
}

fn parse_stdout(stdout: &str) -> std::result::Result<GenerationResult, GenerationError> {
    let text = stdout.trim();
    if text.starts_with('{') {
        serde_json::from_str(text).map_err(|e| {
            GenerationError::message(format!("invalid generator response: {}", e))
        })
    } else if text.is_empty() {
        Ok(GenerationResult::default())
    } else {
        Ok(GenerationResult::with_prompt(text))
    }
}

fn parse_stderr(stderr: &str, code: Option<i32>) -> GenerationError {
    let text = stderr.trim();
    if text.starts_with('{')
        && let Ok(err) = serde_json::from_str::<GenerationError>(text)
    {
        return err;
    }

    if text.is_empty() {
        GenerationError::message(format!("generator exited with status {:?}", code))
    } else {
        GenerationError::message(text)
    }
}
