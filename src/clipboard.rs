//! Clipboard collaborators.
//!
//! The engine only needs "write this text somewhere the user can paste it".
//! [`CommandClipboard`] pipes the text into a configured command such as
//! `pbcopy`, `wl-copy`, or `xclip -selection clipboard`.

use crate::error::{PromptsmithError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Something that can receive copied text.
pub trait Clipboard: Send + Sync {
    /// Write `text` to the clipboard. Failures are `ClipboardError`s.
    fn write_text(&self, text: &str) -> Result<()>;
}

/// Clipboard backed by an external command reading from stdin.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Parse a command line (shell-words quoting rules).
    pub fn from_command_line(command: &str) -> Result<Self> {
        let mut parts = shell_words::split(command).map_err(|e| {
            PromptsmithError::UserError(format!(
                "failed to parse clipboard command '{}': {}",
                command, e
            ))
        })?;

        if parts.is_empty() {
            return Err(PromptsmithError::UserError(
                "clipboard command is empty".to_string(),
            ));
        }

        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
        })
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                PromptsmithError::ClipboardError(format!(
                    "failed to run '{}': {}",
                    self.program, e
                ))
            })?;

        // Feed stdin from a scoped thread so the child is always reaped, even
        // when it exits without reading.
        let stdin = child.stdin.take();
        let (written, status) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(text.as_bytes()),
                None => Ok(()),
            });
            let status = child.wait();
            (writer.join(), status)
        });

        let status = status.map_err(|e| PromptsmithError::ClipboardError(e.to_string()))?;
        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(PromptsmithError::ClipboardError(format!(
                    "'{}' did not accept the text: {}",
                    self.program, e
                )));
            }
            Err(_) => {
                return Err(PromptsmithError::ClipboardError(
                    "clipboard writer thread panicked".to_string(),
                ));
            }
        }

        if status.success() {
            Ok(())
        } else {
            Err(PromptsmithError::ClipboardError(format!(
                "'{}' exited with {:?}",
                self.program,
                status.code()
            )))
        }
    }
}

/// Clipboard used when none is configured; every write fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<()> {
        Err(PromptsmithError::ClipboardError(
            "no clipboard_command configured".to_string(),
        ))
    }
}
