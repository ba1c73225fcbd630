//! Agent Router - picks exactly one synthesis path per query
//!
//! Precedence, first match wins:
//! 1. custom workflow rule
//! 2. the bare word `history`
//! 3. keyword tests, each naming one agent
//! 4. the generative backend
//!
//! Once a keyword selects an agent the router is committed to it. If that
//! agent cannot build the command itself, the query goes to the backend,
//! never to the next keyword in line.

use crate::agents::{Agent, Synthesis};
use crate::clean::{clean_command, resolve_placeholders};
use crate::config::Config;
use crate::context::ShellContext;
use crate::normalize::NormalizedQuery;
use crate::ollama::{build_prompt, Backend};
use crate::safety;
use crate::workflows::WorkflowMatcher;
use crate::{slog_debug, slog_error, slog_info};
use serde::Serialize;
use serde_json::json;

/// Which path produced a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "agent")]
pub enum Source {
    Workflow,
    Agent(Agent),
    /// The backend answered; `Some` when an agent delegated to it.
    Backend(Option<Agent>),
}

/// What the router decided to do with a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Workflow(String),
    History,
    Agent(Agent),
    Backend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// A raw candidate command, before cleaning.
    Command { command: String, source: Source },
    /// Show history; no command.
    History,
    /// Nothing usable came back; carries the reason for the user.
    NoCommand(String),
}

/// A command ready for the execution gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub command: String,
    pub source: Source,
    pub harmful: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harmful_pattern: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Suggestion(Suggestion),
    History,
    NoCommand(String),
}

pub struct AgentRouter<B: Backend> {
    backend: B,
    model: String,
    workflows: WorkflowMatcher,
    ctx: ShellContext,
}

impl<B: Backend> AgentRouter<B> {
    pub fn new(backend: B, model: impl Into<String>, workflows: WorkflowMatcher, ctx: ShellContext) -> Self {
        Self {
            backend,
            model: model.into(),
            workflows,
            ctx,
        }
    }

    /// Router wired from config: model name and the JSON workflow rules.
    pub fn from_config(config: &Config, ctx: ShellContext, backend: B) -> Self {
        let workflows = WorkflowMatcher::from_rules(&config.custom_workflows);
        Self::new(backend, config.model.clone(), workflows, ctx)
    }

    pub fn context(&self) -> &ShellContext {
        &self.ctx
    }

    pub fn workflows_mut(&mut self) -> &mut WorkflowMatcher {
        &mut self.workflows
    }

    /// Decide the path for a query without running any agent or backend.
    pub fn select(&self, query: &NormalizedQuery) -> Selection {
        if let Some(command) = self.workflows.apply(&query.raw, &self.ctx) {
            if !command.is_empty() {
                return Selection::Workflow(command);
            }
        }

        if query.is_history_request() {
            Selection::History
        } else if query.contains("hidden") {
            Selection::Agent(Agent::File)
        } else if query.contains("directory") && query.contains_any(&["find", "list"]) {
            Selection::Agent(Agent::Directory)
        } else if query.contains_any(&["ping", "traceroute"]) {
            Selection::Agent(Agent::Network)
        } else if query.contains_any(&["cpu", "memory", "disk"]) {
            Selection::Agent(Agent::System)
        } else if query.contains("install") {
            Selection::Agent(Agent::Package)
        } else if query.contains("docker") {
            Selection::Agent(Agent::Docker)
        } else {
            Selection::Backend
        }
    }

    /// Produce the raw candidate command for a query.
    pub fn route(&self, query: &str) -> Route {
        let normalized = NormalizedQuery::new(query);
        let selection = self.select(&normalized);

        slog_info!("ROUTER", "selected", json!({
            "query": query,
            "selection": format!("{:?}", selection),
        }));

        match selection {
            Selection::Workflow(command) => Route::Command {
                command,
                source: Source::Workflow,
            },
            Selection::History => Route::History,
            Selection::Agent(agent) => match agent.synthesize(&normalized, &self.ctx) {
                Synthesis::Command(command) => Route::Command {
                    command,
                    source: Source::Agent(agent),
                },
                Synthesis::Delegate => {
                    slog_debug!("ROUTER", "delegated", json!({ "agent": agent.name() }));
                    self.ask_backend(query, Some(agent))
                }
            },
            Selection::Backend => self.ask_backend(query, None),
        }
    }

    /// Route, then clean, resolve placeholders and classify.
    pub fn suggest(&self, query: &str) -> Outcome {
        match self.route(query) {
            Route::Command { command, source } => Outcome::Suggestion(self.finalize(&command, source)),
            Route::History => Outcome::History,
            Route::NoCommand(reason) => Outcome::NoCommand(reason),
        }
    }

    /// Cleaning and placeholder resolution, then classification of the
    /// final text.
    pub fn finalize(&self, raw: &str, source: Source) -> Suggestion {
        let command = resolve_placeholders(&clean_command(raw), &self.ctx);
        let harmful_pattern = safety::matched_pattern(&command);

        Suggestion {
            harmful: harmful_pattern.is_some(),
            harmful_pattern,
            command,
            source,
        }
    }

    fn ask_backend(&self, query: &str, via: Option<Agent>) -> Route {
        match self.backend.synthesize(&build_prompt(query), &self.model) {
            Ok(command) if !command.trim().is_empty() => Route::Command {
                command,
                source: Source::Backend(via),
            },
            Ok(_) => Route::NoCommand("the model returned an empty answer".to_string()),
            Err(e) => {
                slog_error!("ROUTER", "backend_failed", json!({
                    "query": query,
                    "error": e.to_string(),
                }));
                Route::NoCommand(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, TerminusError};
    use crate::workflows::WorkflowRule;
    use std::cell::RefCell;

    #[derive(Default)]
    struct ScriptedBackend {
        answer: Option<String>,
        prompts: RefCell<Vec<String>>,
    }

    impl Backend for ScriptedBackend {
        fn synthesize(&self, prompt: &str, _model: &str) -> Result<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.answer
                .clone()
                .ok_or_else(|| TerminusError::Backend("connection refused".into()))
        }
    }

    fn router(answer: Option<&str>, rules: &[WorkflowRule]) -> AgentRouter<ScriptedBackend> {
        let backend = ScriptedBackend {
            answer: answer.map(str::to_string),
            ..Default::default()
        };
        AgentRouter::new(
            backend,
            "llama3.2:3b",
            WorkflowMatcher::from_rules(rules),
            ShellContext::new("/home/ada", "ada", "/home/ada/work"),
        )
    }

    fn selection(query: &str) -> Selection {
        router(None, &[]).select(&NormalizedQuery::new(query))
    }

    #[test]
    fn test_keyword_precedence() {
        assert_eq!(selection("list hidden directory"), Selection::Agent(Agent::File));
        assert_eq!(selection("find my directory"), Selection::Agent(Agent::Directory));
        assert_eq!(selection("directory size"), Selection::Backend);
        assert_eq!(selection("ping disk server"), Selection::Agent(Agent::Network));
        assert_eq!(selection("install disk tools"), Selection::Agent(Agent::System));
        assert_eq!(selection("install docker"), Selection::Agent(Agent::Package));
        assert_eq!(selection("docker ps"), Selection::Agent(Agent::Docker));
        assert_eq!(selection("what time is it"), Selection::Backend);
    }

    #[test]
    fn test_history_only_when_alone() {
        assert_eq!(selection("history"), Selection::History);
        assert_eq!(selection("clear bash history"), Selection::Backend);
    }

    #[test]
    fn test_workflow_beats_history_and_agents() {
        let r = router(None, &[WorkflowRule::new("^history$", "cat ~/.bash_history")]);
        assert_eq!(
            r.route("history"),
            Route::Command {
                command: "cat ~/.bash_history".into(),
                source: Source::Workflow,
            }
        );
    }

    #[test]
    fn test_committed_agent_delegates_to_backend() {
        let r = router(Some("ls -a ~"), &[]);
        let route = r.route("show hidden stuff and ping me");

        assert_eq!(
            route,
            Route::Command {
                command: "ls -a ~".into(),
                source: Source::Backend(Some(Agent::File)),
            }
        );
        assert_eq!(r.backend.prompts.borrow().len(), 1);
    }

    #[test]
    fn test_agent_hit_skips_backend() {
        let r = router(Some("unused"), &[]);
        let route = r.route("find hidden files in /tmp");

        assert_eq!(
            route,
            Route::Command {
                command: "find /tmp -type f -name '.*'".into(),
                source: Source::Agent(Agent::File),
            }
        );
        assert!(r.backend.prompts.borrow().is_empty());
    }

    #[test]
    fn test_backend_prompt_contains_query() {
        let r = router(Some("date"), &[]);
        r.route("what time is it");
        assert_eq!(r.backend.prompts.borrow()[0], build_prompt("what time is it"));
    }

    #[test]
    fn test_backend_failure_is_no_command() {
        let r = router(None, &[]);
        match r.route("compress my photos") {
            Route::NoCommand(reason) => assert!(reason.contains("connection refused")),
            other => panic!("unexpected route: {:?}", other),
        }
    }

    #[test]
    fn test_blank_backend_answer_is_no_command() {
        let r = router(Some("   "), &[]);
        assert!(matches!(r.route("compress my photos"), Route::NoCommand(_)));
    }

    #[test]
    fn test_suggest_cleans_resolves_and_classifies() {
        let r = router(Some("```bash\nrm -rf /path/to/build\n```"), &[]);
        match r.suggest("wipe the build folder") {
            Outcome::Suggestion(s) => {
                assert_eq!(s.command, "rm -rf /home/ada/work/build");
                assert!(!s.harmful);
                assert_eq!(s.source, Source::Backend(None));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_suggest_flags_harmful_after_cleaning() {
        let r = router(Some("`sudo rm -rf /`"), &[]);
        match r.suggest("free up all space") {
            Outcome::Suggestion(s) => {
                assert!(s.harmful);
                assert_eq!(s.harmful_pattern, Some("sudo-rm-rf-root"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
