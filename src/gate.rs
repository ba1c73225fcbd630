//! Execution Gate for terminus
//!
//! Decides what happens to a suggested command:
//! - harmful commands get a warning and an explicit run/deny/simulate prompt
//! - otherwise `confirm_execution` decides whether to ask at all
//! - safe mode turns every real run into a simulation at invocation time
//!
//! A decline, a blank answer, Ctrl-C or EOF at a prompt all cancel.

use crate::config::Config;
use crate::line_editor::{LineSource, ReadResult};
use crate::runner::{ProcessRunner, RunResult};
use crate::ui::{Palette, Style};
use crate::{slog_info, slog_warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::{self, Write};

const HARMFUL_PROMPT: &str = "Proceed with execution? [y/N/s(simulate)] ";
const CONFIRM_PROMPT: &str = "Execute command? [y/N/s(simulate)] ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPolicy {
    pub allow_harmful_commands: bool,
    pub confirm_execution: bool,
    pub safe_mode: bool,
}

impl ExecutionPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            allow_harmful_commands: config.allow_harmful_commands,
            confirm_execution: config.confirm_execution,
            safe_mode: config.safe_mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Execute,
    Simulate,
    Cancel,
}

impl Decision {
    /// `y` runs, `s` simulates, anything else cancels.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "y" => Decision::Execute,
            "s" => Decision::Simulate,
            _ => Decision::Cancel,
        }
    }
}

/// Which rule produced the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Checkpoint {
    HarmfulPrompt,
    ConfirmPrompt,
    Direct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Cancelled,
    Simulated,
    Ran(RunResult),
    SpawnFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateReport {
    pub checkpoint: Checkpoint,
    pub decision: Decision,
    pub outcome: Outcome,
}

impl GateReport {
    /// Commands stopped at the harmful-command prompt stay out of history.
    pub fn should_record(&self) -> bool {
        self.checkpoint != Checkpoint::HarmfulPrompt
    }
}

pub struct ExecutionGate<R: ProcessRunner> {
    policy: ExecutionPolicy,
    runner: R,
    palette: Palette,
}

impl<R: ProcessRunner> ExecutionGate<R> {
    pub fn new(policy: ExecutionPolicy, runner: R, palette: Palette) -> Self {
        Self {
            policy,
            runner,
            palette,
        }
    }

    pub fn policy(&self) -> &ExecutionPolicy {
        &self.policy
    }

    /// Pick a decision, prompting when the policy asks for it.
    pub fn decide(
        &self,
        harmful: bool,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
    ) -> io::Result<(Checkpoint, Decision)> {
        if harmful && !self.policy.allow_harmful_commands {
            writeln!(
                out,
                "{}",
                self.palette.paint(Style::Error, "Warning: Detected potentially harmful command.")
            )?;
            let decision = self.ask(HARMFUL_PROMPT, input, out)?;
            return Ok((Checkpoint::HarmfulPrompt, decision));
        }

        if self.policy.confirm_execution {
            let decision = self.ask(CONFIRM_PROMPT, input, out)?;
            return Ok((Checkpoint::ConfirmPrompt, decision));
        }

        Ok((Checkpoint::Direct, Decision::Execute))
    }

    fn ask(&self, prompt: &str, input: &mut dyn LineSource, out: &mut dyn Write) -> io::Result<Decision> {
        out.flush()?;
        let prompt = format!("\n{}", self.palette.paint(Style::Warning, prompt));
        match input.read_line(&prompt) {
            ReadResult::Line(answer) => Ok(Decision::from_answer(&answer)),
            ReadResult::Interrupted | ReadResult::Eof => {
                writeln!(out)?;
                Ok(Decision::Cancel)
            }
        }
    }

    /// Carry out a decision. With `safe_mode` set, `Execute` is simulated.
    pub fn execute(
        &self,
        command: &str,
        decision: Decision,
        safe_mode: bool,
        out: &mut dyn Write,
    ) -> io::Result<Outcome> {
        let effective = match decision {
            Decision::Execute if safe_mode => Decision::Simulate,
            other => other,
        };

        match effective {
            Decision::Cancel => {
                writeln!(out, "Command execution cancelled.")?;
                Ok(Outcome::Cancelled)
            }
            Decision::Simulate => {
                writeln!(
                    out,
                    "{}",
                    self.palette.paint(Style::Warning, "Safe mode enabled - Simulating execution:")
                )?;
                writeln!(out, "{}\n", self.palette.paint(Style::Command, command))?;
                Ok(Outcome::Simulated)
            }
            Decision::Execute => self.run(command, out),
        }
    }

    fn run(&self, command: &str, out: &mut dyn Write) -> io::Result<Outcome> {
        let result = match self.runner.run(command) {
            Ok(result) => result,
            Err(e) => {
                slog_warn!("GATE", "spawn_failed", json!({ "command": command, "error": e.to_string() }));
                writeln!(out, "\n{}", self.palette.paint(Style::Error, &e.to_string()))?;
                return Ok(Outcome::SpawnFailed(e.to_string()));
            }
        };

        slog_info!("GATE", "ran", json!({ "command": command, "code": result.code }));

        if result.success() {
            if !result.stdout.is_empty() {
                writeln!(out, "\n{}\n{}", self.palette.paint(Style::Success, "Output:"), result.stdout)?;
            }
            if !result.stderr.is_empty() {
                writeln!(out, "\n{}\n{}", self.palette.paint(Style::Error, "Errors:"), result.stderr)?;
            }
        } else {
            let code = result
                .code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            let heading = format!("Command failed with error code {}:", code);
            writeln!(out, "\n{}\n{}", self.palette.paint(Style::Error, &heading), result.stderr)?;
        }

        Ok(Outcome::Ran(result))
    }

    /// Decide and execute under the configured safe mode.
    pub fn process(
        &self,
        command: &str,
        harmful: bool,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
    ) -> io::Result<GateReport> {
        self.process_with(command, harmful, self.policy.safe_mode, input, out)
    }

    /// Decide and execute, with safe mode given for this command only.
    pub fn process_with(
        &self,
        command: &str,
        harmful: bool,
        safe_mode: bool,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
    ) -> io::Result<GateReport> {
        let (checkpoint, decision) = self.decide(harmful, input, out)?;

        slog_info!("GATE", "decided", json!({
            "command": command,
            "harmful": harmful,
            "checkpoint": checkpoint,
            "decision": decision,
            "safe_mode": safe_mode,
        }));

        let outcome = self.execute(command, decision, safe_mode, out)?;
        Ok(GateReport {
            checkpoint,
            decision,
            outcome,
        })
    }
}
