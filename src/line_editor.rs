//! line_editor: where queries and confirmations are read from
//!
//! Interactive sessions use rustyline:
//!   - Up/Down arrow: history cycling
//!   - Ctrl-C: interrupt (abandons the current query, re-prompts)
//!   - Ctrl-D: EOF (ends the session)
//!
//! Piped input (and tests) use `ReaderInput`, which reads plain lines from any
//! `BufRead` and writes prompts to a separate sink.

use crate::error::{Result, TerminusError};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor, EditMode};
use std::io::{BufRead, Write};

/// Result of a single line read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResult {
    /// User entered a line of text.
    Line(String),
    /// User pressed Ctrl-C.
    Interrupted,
    /// User pressed Ctrl-D or input closed.
    Eof,
}

/// Anything that can show a prompt and hand back one line.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> ReadResult;
}

/// rustyline-backed editor with Emacs keybindings and in-memory history.
pub struct LineEditor {
    editor: DefaultEditor,
}

impl LineEditor {
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .edit_mode(EditMode::Emacs)
            .auto_add_history(true)
            .build();

        let editor = DefaultEditor::with_config(config)
            .map_err(|e| TerminusError::Editor(e.to_string()))?;

        Ok(LineEditor { editor })
    }
}

impl LineSource for LineEditor {
    fn read_line(&mut self, prompt: &str) -> ReadResult {
        match self.editor.readline(prompt) {
            Ok(line) => ReadResult::Line(line),
            Err(ReadlineError::Interrupted) => ReadResult::Interrupted,
            Err(ReadlineError::Eof) => ReadResult::Eof,
            Err(_) => ReadResult::Eof, // treat other errors as EOF
        }
    }
}

/// Line source over a reader, for non-interactive input.
pub struct ReaderInput<R: BufRead, W: Write> {
    reader: R,
    prompt_sink: W,
}

impl<R: BufRead, W: Write> ReaderInput<R, W> {
    pub fn new(reader: R, prompt_sink: W) -> Self {
        Self { reader, prompt_sink }
    }

    pub fn into_prompt_sink(self) -> W {
        self.prompt_sink
    }
}

impl<R: BufRead, W: Write> LineSource for ReaderInput<R, W> {
    fn read_line(&mut self, prompt: &str) -> ReadResult {
        let _ = write!(self.prompt_sink, "{}", prompt);
        let _ = self.prompt_sink.flush();

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => ReadResult::Eof,
            Ok(_) => ReadResult::Line(line.trim_end_matches(['\n', '\r']).to_string()),
        }
    }
}
