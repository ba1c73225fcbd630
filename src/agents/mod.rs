//! Specialized agents.
//!
//! Each agent owns one domain and tries to build the command directly from
//! the query with a short, ordered chain of keyword tests and regexes. When
//! it cannot, it answers `Synthesis::Delegate` and the router hands the
//! query to the generative backend.

use crate::context::ShellContext;
use crate::normalize::NormalizedQuery;
use serde::{Deserialize, Serialize};

pub mod directory;
pub mod docker;
pub mod file;
pub mod network;
pub mod package;
pub mod system;

/// Outcome of an agent's own attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Synthesis {
    Command(String),
    Delegate,
}

impl Synthesis {
    pub fn command(&self) -> Option<&str> {
        match self {
            Synthesis::Command(c) => Some(c),
            Synthesis::Delegate => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agent {
    File,
    Directory,
    Network,
    System,
    Package,
    Docker,
}

impl Agent {
    pub fn name(&self) -> &'static str {
        match self {
            Agent::File => "file",
            Agent::Directory => "directory",
            Agent::Network => "network",
            Agent::System => "system",
            Agent::Package => "package",
            Agent::Docker => "docker",
        }
    }

    pub fn synthesize(&self, query: &NormalizedQuery, ctx: &ShellContext) -> Synthesis {
        match self {
            Agent::File => file::synthesize(query, ctx),
            Agent::Directory => directory::synthesize(query, ctx),
            Agent::Network => network::synthesize(query),
            Agent::System => system::synthesize(query),
            Agent::Package => package::synthesize(query),
            Agent::Docker => docker::synthesize(query),
        }
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
