//! Configuration for terminus
//!
//! Read from `~/.config/terminusai/config.json`. A missing or broken file is
//! not an error: every field has a default and unknown keys are ignored.

use crate::ollama::DEFAULT_OLLAMA_URL;
use crate::workflows::{WorkflowMatcher, WorkflowRule};
use crate::{slog_debug, slog_warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".config/terminusai";
pub const CONFIG_FILE: &str = "config.json";
pub const HISTORY_FILE: &str = "history.json";
pub const WORKFLOWS_DIR: &str = "workflows";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model identifier passed to the backend
    pub model: String,
    /// Simulate instead of running
    pub safe_mode: bool,
    /// Ask before running anything
    pub confirm_execution: bool,
    /// Number of history entries kept
    pub history_size: usize,
    pub enable_colors: bool,
    /// Skip the harmful-command prompt entirely
    pub allow_harmful_commands: bool,
    pub custom_workflows: Vec<WorkflowRule>,
    pub ollama_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "llama3.2:3b".to_string(),
            safe_mode: true,
            confirm_execution: true,
            history_size: 10,
            enable_colors: true,
            allow_harmful_commands: false,
            custom_workflows: Vec::new(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
        }
    }
}

impl Config {
    /// `~/.config/terminusai`, or a relative path when no home is known
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_DIR))
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR))
    }

    pub fn default_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    pub fn history_path() -> PathBuf {
        Self::config_dir().join(HISTORY_FILE)
    }

    pub fn workflows_dir() -> PathBuf {
        Self::config_dir().join(WORKFLOWS_DIR)
    }

    /// Load from `path`, falling back to defaults when it cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                slog_debug!("CONFIG", "using_defaults", json!({
                    "path": path.display().to_string(),
                    "reason": e.to_string(),
                }));
                return Self::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                slog_warn!("CONFIG", "parse_failed", json!({
                    "path": path.display().to_string(),
                    "error": e.to_string(),
                }));
                Self::default()
            }
        }
    }

    /// JSON workflow rules followed by any YAML rule files in `dir`.
    pub fn workflow_matcher(&self, dir: impl AsRef<Path>) -> WorkflowMatcher {
        let mut matcher = WorkflowMatcher::from_rules(&self.custom_workflows);
        let dir = dir.as_ref();
        if dir.is_dir() {
            if let Err(e) = matcher.load_from_directory(dir) {
                slog_warn!("CONFIG", "workflows_dir_unreadable", json!({
                    "path": dir.display().to_string(),
                    "error": e.to_string(),
                }));
            }
        }
        matcher
    }
}
