//! Candidate command cleanup: markdown removal and placeholder paths.
//!
//! Models answer with fenced blocks and `/path/to/thing` templates more
//! often than not. Both passes are pure text transforms and each returns a
//! fresh string.

use crate::context::ShellContext;
use regex::{Captures, Regex};

lazy_static::lazy_static! {
    static ref FENCED_BLOCK: Regex = Regex::new(r"(?s)```(?:bash|sh)?\n(.*?)\n```").unwrap();
    static ref PLACEHOLDER_PATH: Regex = Regex::new(r"/path/to/([^\s/]+)").unwrap();
}

/// Strip fenced code blocks down to their body, drop stray backticks and
/// surrounding whitespace. Applying it twice changes nothing.
pub fn clean_command(command: &str) -> String {
    let unfenced = FENCED_BLOCK.replace_all(command, "$1");
    unfenced.replace('`', "").trim().to_string()
}

/// Rewrite every `/path/to/<name>` into `<cwd>/<name>`.
///
/// The rewrite happens whether or not `<name>` exists.
pub fn resolve_placeholders(command: &str, ctx: &ShellContext) -> String {
    PLACEHOLDER_PATH
        .replace_all(command, |caps: &Captures| ctx.absolute_string(&caps[1]))
        .into_owned()
}
