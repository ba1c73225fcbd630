//! Interactive session
//!
//! One query per line: route it, show the suggestion, hand it to the gate,
//! record it. Errors from a single query are reported and the loop goes on.

use crate::gate::ExecutionGate;
use crate::history::HistoryStore;
use crate::line_editor::{LineSource, ReadResult};
use crate::ollama::Backend;
use crate::router::{AgentRouter, Outcome};
use crate::runner::ProcessRunner;
use crate::slog_warn;
use crate::ui::{Palette, Style};
use serde_json::json;
use std::io::{self, Write};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const QUERY_PROMPT: &str = "» Terminal Query: ";
/// Query prefix that simulates the resulting command whatever the safe-mode setting.
pub const SIMULATE_PREFIX: &str = "!sim";

const LOGO: &str = r#"
 _                      _
| |_ ___ _ __ _ __ ___ (_)_ __  _   _ ___
| __/ _ \ '__| '_ ` _ \| | '_ \| | | / __|
| ||  __/ |  | | | | | | | | | | |_| \__ \
 \__\___|_|  |_| |_| |_|_|_| |_|\__,_|___/
"#;

const TAGLINE: &str = "natural language in, shell commands out";

pub fn is_exit_command(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "exit" | "quit" | "q")
}

/// Split off a leading `!sim`. Returns whether it was present and the rest.
pub fn split_simulate(query: &str) -> (bool, &str) {
    match query.strip_prefix(SIMULATE_PREFIX) {
        Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest.trim()),
        _ => (false, query),
    }
}

pub struct Session<B: Backend, R: ProcessRunner> {
    router: AgentRouter<B>,
    gate: ExecutionGate<R>,
    history: HistoryStore,
    palette: Palette,
}

impl<B: Backend, R: ProcessRunner> Session<B, R> {
    pub fn new(router: AgentRouter<B>, gate: ExecutionGate<R>, history: HistoryStore, palette: Palette) -> Self {
        Self {
            router,
            gate,
            history,
            palette,
        }
    }

    pub fn banner(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.palette.enabled() {
            writeln!(out, "{}", self.palette.paint(Style::Title, LOGO))?;
            writeln!(out, "{}", self.palette.paint(Style::Heading, &format!("v{}", VERSION)))?;
            writeln!(out, "{}\n", self.palette.paint(Style::Muted, TAGLINE))?;
        } else {
            writeln!(out, "terminus v{} - {}", VERSION, TAGLINE)?;
        }
        writeln!(
            out,
            "Type 'history' for past commands, '{} <query>' to only simulate, 'exit' to quit.",
            SIMULATE_PREFIX
        )
    }

    /// Read queries until EOF or an exit word.
    pub fn run(&self, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<()> {
        self.banner(out)?;
        let prompt = format!("\n{}", self.palette.paint(Style::Prompt, QUERY_PROMPT));

        loop {
            out.flush()?;
            let line = match input.read_line(&prompt) {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => {
                    writeln!(out, "\n{}", self.palette.paint(Style::Muted, "(type 'exit' to quit)"))?;
                    continue;
                }
                ReadResult::Eof => {
                    writeln!(out, "\nGoodbye!")?;
                    return Ok(());
                }
            };

            let query = line.trim();
            if query.is_empty() {
                continue;
            }
            if is_exit_command(query) {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }

            let (simulate, query) = split_simulate(query);
            self.handle(query, simulate, input, out)?;
        }
    }

    /// One query end to end. `simulate` forces safe mode for this query only.
    pub fn handle(
        &self,
        query: &str,
        simulate: bool,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let suggestion = match self.router.suggest(query) {
            Outcome::Suggestion(suggestion) => suggestion,
            Outcome::History => return self.history.display(out),
            Outcome::NoCommand(reason) => {
                writeln!(out, "{}", self.palette.paint(Style::Error, &format!("Error from LLM: {}", reason)))?;
                return Ok(());
            }
        };

        writeln!(out, "\n{}", self.palette.paint(Style::Heading, "Suggested command:"))?;
        writeln!(out, "{}", self.palette.paint(Style::Command, &suggestion.command))?;

        let safe_mode = simulate || self.gate.policy().safe_mode;
        let report = self
            .gate
            .process_with(&suggestion.command, suggestion.harmful, safe_mode, input, out)?;

        if report.should_record() {
            if let Err(e) = self.history.record(query, &suggestion.command) {
                slog_warn!("HISTORY", "record_failed", json!({ "error": e.to_string() }));
                writeln!(out, "{}", self.palette.paint(Style::Error, &e.to_string()))?;
            }
        }
        Ok(())
    }
}
