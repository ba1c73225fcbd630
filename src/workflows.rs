//! Custom workflows for terminus
//!
//! User-defined `pattern -> command` rules that run before any built-in
//! agent. Templates take positional `{1}..{n}` placeholders for capture
//! groups, plus `{home}` and `{user}`.
//!
//! Rules come from the `custom_workflows` list in config.json and,
//! optionally, from YAML files in the workflows directory.

use crate::context::ShellContext;
use crate::error::{Result, TerminusError};
use crate::{slog_debug, slog_warn};
use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::Path;

lazy_static::lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{(\d+|home|user)\}").unwrap();
}

/// A rule as written by the user. Both fields are optional at parse time so
/// a half-written rule does not break the whole config.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRule {
    /// Regex searched (case-insensitively) anywhere in the query
    pub pattern: Option<String>,
    /// Command template
    pub command: Option<String>,
}

impl WorkflowRule {
    pub fn new(pattern: &str, command: &str) -> Self {
        Self {
            pattern: Some(pattern.to_string()),
            command: Some(command.to_string()),
        }
    }
}

#[derive(Clone, Debug)]
struct CompiledRule {
    regex: Regex,
    template: String,
}

/// Ordered rule set; the first matching rule wins.
#[derive(Clone, Debug, Default)]
pub struct WorkflowMatcher {
    rules: Vec<CompiledRule>,
}

impl WorkflowMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a matcher from rules, skipping malformed ones.
    pub fn from_rules(rules: &[WorkflowRule]) -> Self {
        let mut matcher = Self::new();
        for rule in rules {
            matcher.register(rule);
        }
        matcher
    }

    /// Append a rule. Returns false (and logs) when the rule is skipped.
    pub fn register(&mut self, rule: &WorkflowRule) -> bool {
        let (pattern, template) = match (&rule.pattern, &rule.command) {
            (Some(p), Some(c)) if !p.is_empty() && !c.is_empty() => (p, c),
            _ => {
                slog_debug!("WORKFLOWS", "rule_skipped", json!({
                    "reason": "missing pattern or command",
                    "pattern": rule.pattern,
                }));
                return false;
            }
        };

        match compile(pattern) {
            Ok(regex) => {
                self.rules.push(CompiledRule {
                    regex,
                    template: template.clone(),
                });
                true
            }
            Err(e) => {
                slog_debug!("WORKFLOWS", "rule_skipped", json!({
                    "reason": e.to_string(),
                    "pattern": pattern,
                }));
                false
            }
        }
    }

    /// Load rules from a YAML file holding a list of `{pattern, command}`
    pub fn load_from_yaml<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let content = fs::read_to_string(path.as_ref())?;
        let rules: Vec<WorkflowRule> = serde_yaml::from_str(&content)?;

        Ok(rules.iter().filter(|rule| self.register(rule)).count())
    }

    /// Load every `.yaml`/`.yml` file in a directory, in file-name order
    pub fn load_from_directory<P: AsRef<Path>>(&mut self, dir: P) -> Result<usize> {
        let mut paths: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .map(|e| e == "yaml" || e == "yml")
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        let mut total = 0;
        for path in paths {
            match self.load_from_yaml(&path) {
                Ok(count) => total += count,
                Err(e) => slog_warn!("WORKFLOWS", "file_skipped", json!({
                    "path": path.display().to_string(),
                    "error": e.to_string(),
                })),
            }
        }

        Ok(total)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render the first rule whose pattern matches the query.
    pub fn apply(&self, query: &str, ctx: &ShellContext) -> Option<String> {
        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(caps) = rule.regex.captures(query) {
                let command = render(&rule.template, &caps, ctx);
                slog_debug!("WORKFLOWS", "matched", json!({
                    "rule": index,
                    "command": command,
                }));
                return Some(command);
            }
        }
        None
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| TerminusError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Single pass over the template, so captured text is never re-expanded.
/// Indices past the last group, and `{0}`, are left as written.
fn render(template: &str, caps: &Captures, ctx: &ShellContext) -> String {
    PLACEHOLDER
        .replace_all(template, |p: &Captures| match &p[1] {
            "home" => ctx.home_string(),
            "user" => ctx.user().to_string(),
            digits => match digits.parse::<usize>() {
                Ok(i) if i >= 1 && i < caps.len() => caps
                    .get(i)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                _ => p[0].to_string(),
            },
        })
        .into_owned()
}
