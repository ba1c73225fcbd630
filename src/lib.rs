//! terminus - natural language to shell commands
//!
//! Modules:
//! - normalize: Lowercased query view used by every keyword test
//! - workflows: User-defined regex rules with `{i}`/`{home}`/`{user}` templates
//! - agents: Rule-based command builders for files, directories, network, system, packages, docker
//! - ollama: Generative backend over the Ollama chat API
//! - router: Workflow, history, agent or backend, first match wins
//! - clean: Markdown fence stripping and `/path/to/` placeholder resolution
//! - safety: Harmful command blocklist
//! - gate: Confirm, simulate or run a suggested command
//! - runner: `sh -c` process runner
//! - history: Capped JSON query history
//! - config: JSON configuration with defaults
//! - repl: Interactive session loop
//! - structured_log: JSON/text event logging

pub mod agents;
pub mod clean;
pub mod config;
pub mod context;
pub mod error;
pub mod gate;
pub mod history;
pub mod line_editor;
pub mod normalize;
pub mod ollama;
pub mod repl;
pub mod router;
pub mod runner;
pub mod safety;
pub mod structured_log;
pub mod ui;
pub mod workflows;

// Re-export key types for convenience
pub use agents::{Agent, Synthesis};
pub use config::Config;
pub use context::ShellContext;
pub use error::{Result, TerminusError};
pub use gate::{Checkpoint, Decision, ExecutionGate, ExecutionPolicy, GateReport};
pub use history::{HistoryEntry, HistoryStore};
pub use line_editor::{LineEditor, LineSource, ReadResult, ReaderInput};
pub use normalize::NormalizedQuery;
pub use ollama::{Backend, OllamaBackend};
pub use repl::Session;
pub use router::{AgentRouter, Outcome, Route, Selection, Source, Suggestion};
pub use runner::{ProcessRunner, RunResult, ShellRunner};
pub use safety::is_command_harmful;
pub use workflows::{WorkflowMatcher, WorkflowRule};
