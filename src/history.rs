//! Line input with persisted history.
//!
//! Wraps a rustyline editor so the rest of the tool reads terminal input
//! through one place. Interrupts and EOF are ordinary outcomes here, never
//! errors; history lives at `~/.config/aicmd/history.txt` and is rewritten
//! after every completed query cycle so it survives abrupt termination.

use crate::config::Config;
use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::{debug, warn};

/// One read from the terminal.
pub enum Input {
    /// A line of text, trailing newline removed.
    Line(String),
    /// Ctrl-C at the prompt.
    Interrupted,
    /// Ctrl-D / end of input.
    Eof,
}

/// Terminal prompter with persisted history.
pub struct Prompter {
    editor: DefaultEditor,
    history_path: PathBuf,
}

impl Prompter {
    /// Create a prompter, loading any existing history.
    pub fn new() -> Result<Self> {
        let mut editor = DefaultEditor::new().context("Failed to initialize line editor")?;
        let history_path = Config::history_path()?;
        if let Err(e) = editor.load_history(&history_path) {
            // Missing on first run; anything else is still non-fatal.
            debug!("No history loaded from {}: {}", history_path.display(), e);
        }
        Ok(Self {
            editor,
            history_path,
        })
    }

    /// Read one line, folding interrupt/EOF into the result.
    pub fn read_line(&mut self, prompt: &str) -> Result<Input> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Input::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(e) => Err(e).context("Failed to read input"),
        }
    }

    /// Append a line to the in-memory history buffer.
    pub fn remember(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            warn!("Failed to record history entry: {}", e);
        }
    }

    /// Write the history buffer to disk. Failure is reported, not fatal.
    pub fn save_history(&mut self) {
        if let Some(parent) = self.history_path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create history directory: {}", e);
                return;
            }
        }
        if let Err(e) = self.editor.save_history(&self.history_path) {
            warn!(
                "Failed to save history to {}: {}",
                self.history_path.display(),
                e
            );
        }
    }
}
