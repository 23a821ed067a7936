use crate::clipboard::Clipboard;
use crate::error::{PromptsmithError, Result};
use crate::generation::{GenerationError, GenerationRequest, GenerationResult, Generator};
use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Switches the process working directory for the guard's lifetime.
pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // The working directory is process-global; hold the lock even under #[serial].
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

type Outcome = std::result::Result<GenerationResult, GenerationError>;

/// Generator that replays queued outcomes and records every request.
#[derive(Default)]
pub(crate) struct ScriptedGenerator {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn replying(prompt: &str) -> Self {
        let generator = Self::new();
        generator.push_ok(GenerationResult::with_prompt(prompt));
        generator
    }

    pub(crate) fn failing(err: GenerationError) -> Self {
        let generator = Self::new();
        generator.push_err(err);
        generator
    }

    pub(crate) fn push_ok(&self, result: GenerationResult) {
        self.lock_outcomes().push_back(Ok(result));
    }

    pub(crate) fn push_err(&self, err: GenerationError) {
        self.lock_outcomes().push_back(Err(err));
    }

    pub(crate) fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    fn lock_outcomes(&self) -> std::sync::MutexGuard<'_, VecDeque<Outcome>> {
        self.outcomes
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl Generator for ScriptedGenerator {
    fn generate(&self, request: GenerationRequest) -> BoxFuture<'_, Outcome> {
        self.requests
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(request);
        let outcome = self
            .lock_outcomes()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::message("no scripted outcome left")));
        Box::pin(async move { outcome })
    }
}

/// Clipboard that records writes, or fails every write when `failing`.
#[derive(Default)]
pub(crate) struct RecordingClipboard {
    writes: Mutex<Vec<String>>,
    failing: bool,
}

impl RecordingClipboard {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub(crate) fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }
}

impl Clipboard for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        if self.failing {
            return Err(PromptsmithError::ClipboardError(
                "clipboard unavailable".to_string(),
            ));
        }
        self.writes
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(text.to_string());
        Ok(())
    }
}
