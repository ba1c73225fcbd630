//! Directory lookups under the home tree.

use super::Synthesis;
use crate::context::ShellContext;
use crate::normalize::NormalizedQuery;
use crate::slog_debug;
use regex::Regex;
use serde_json::json;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

lazy_static::lazy_static! {
    static ref FIND_DIR: Regex = Regex::new(r"(?i)find\s+([^\s]+)\s+directory").unwrap();
    static ref LIST_DIR: Regex = Regex::new(r"(?i)list.*files.*in\s+([^\s]+)\s+directory").unwrap();
}

pub fn synthesize(query: &NormalizedQuery, ctx: &ShellContext) -> Synthesis {
    if query.contains_all(&["find", "directory"]) {
        match FIND_DIR.captures(&query.raw) {
            Some(caps) => Synthesis::Command(format!(
                "find {} -type d -iname '{}'",
                ctx.home_string(),
                &caps[1]
            )),
            None => Synthesis::Delegate,
        }
    } else if query.contains_all(&["list", "directory"]) {
        let Some(caps) = LIST_DIR.captures(&query.raw) else {
            return Synthesis::Delegate;
        };
        match find_directory_by_name(&caps[1], ctx.home()) {
            Some(path) => Synthesis::Command(format!("ls -A {}", path.display())),
            None => Synthesis::Delegate,
        }
    } else {
        Synthesis::Delegate
    }
}

/// First directory under `start` whose name equals `name`, ignoring case.
///
/// Every child of a directory is checked before any of them is entered,
/// so `~/proj` wins over `~/a/proj`. Siblings go in file-name order,
/// symlinks are not followed and unreadable entries are skipped.
pub fn find_directory_by_name(name: &str, start: &Path) -> Option<PathBuf> {
    let found = search(start, &name.to_lowercase());

    slog_debug!("AGENT", "directory_lookup", json!({
        "name": name,
        "found": found.as_ref().map(|p| p.display().to_string()),
    }));
    found
}

fn search(dir: &Path, wanted: &str) -> Option<PathBuf> {
    let children: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .collect();

    let hit = children.iter().find(|path| {
        path.file_name()
            .map(|n| n.to_string_lossy().to_lowercase() == wanted)
            .unwrap_or(false)
    });

    match hit {
        Some(path) => Some(path.clone()),
        None => children.iter().find_map(|child| search(child, wanted)),
    }
}
