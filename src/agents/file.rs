//! Hidden-file operations.

use super::Synthesis;
use crate::context::ShellContext;
use crate::normalize::NormalizedQuery;
use regex::Regex;

lazy_static::lazy_static! {
    static ref IN_DIR: Regex = Regex::new(r"(?i)in\s+([^\s]+)").unwrap();
    static ref CREATE_HIDDEN: Regex = Regex::new(r"(?i)create\s+hidden\s+file\s+([^\s]+)").unwrap();
    static ref DELETE_HIDDEN: Regex = Regex::new(r"(?i)delete\s+hidden\s+file\s+([^\s]+)").unwrap();
}

pub fn synthesize(query: &NormalizedQuery, ctx: &ShellContext) -> Synthesis {
    if query.contains_all(&["find", "hidden"]) {
        Synthesis::Command(format!("find {} -type f -name '.*'", target_dir(query, ctx)))
    } else if query.contains_all(&["list", "hidden"]) {
        Synthesis::Command(format!("ls -laR {}", target_dir(query, ctx)))
    } else if query.contains_all(&["create", "hidden", "file"]) {
        match hidden_path(&CREATE_HIDDEN, query, ctx) {
            Some(path) => Synthesis::Command(format!("touch {}", path)),
            None => Synthesis::Delegate,
        }
    } else if query.contains_all(&["delete", "hidden", "file"]) {
        match hidden_path(&DELETE_HIDDEN, query, ctx) {
            Some(path) => Synthesis::Command(format!("rm {}", path)),
            None => Synthesis::Delegate,
        }
    } else {
        Synthesis::Delegate
    }
}

/// Directory named after `in`, or the working directory.
fn target_dir(query: &NormalizedQuery, ctx: &ShellContext) -> String {
    match IN_DIR.captures(&query.raw) {
        Some(caps) => ctx.absolute_string(&caps[1]),
        None => ctx.cwd_string(),
    }
}

/// `<cwd>/.<name>`, adding the leading dot when missing.
fn hidden_path(re: &Regex, query: &NormalizedQuery, ctx: &ShellContext) -> Option<String> {
    let caps = re.captures(&query.raw)?;
    let name = caps[1].trim();
    let name = if name.starts_with('.') {
        name.to_string()
    } else {
        format!(".{}", name)
    };
    Some(ctx.cwd().join(name).display().to_string())
}
