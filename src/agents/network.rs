//! Reachability checks.

use super::Synthesis;
use crate::normalize::NormalizedQuery;
use regex::Regex;

pub const DEFAULT_HOST: &str = "google.com";

lazy_static::lazy_static! {
    static ref PING_TARGET: Regex = Regex::new(r"ping\s+([^\s]+)").unwrap();
    static ref TRACEROUTE_TARGET: Regex = Regex::new(r"traceroute\s+([^\s]+)").unwrap();
}

pub fn synthesize(query: &NormalizedQuery) -> Synthesis {
    if query.contains("ping") {
        Synthesis::Command(format!("ping -c 4 {}", target(&PING_TARGET, query)))
    } else if query.contains_any(&["traceroute", "trace route"]) {
        Synthesis::Command(format!("traceroute {}", target(&TRACEROUTE_TARGET, query)))
    } else {
        Synthesis::Delegate
    }
}

fn target<'a>(re: &Regex, query: &'a NormalizedQuery) -> &'a str {
    re.captures(&query.raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_HOST)
}
