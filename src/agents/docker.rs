//! Docker container and image basics.

use super::Synthesis;
use crate::normalize::NormalizedQuery;
use regex::Regex;

lazy_static::lazy_static! {
    static ref START_CONTAINER: Regex = Regex::new(r"(?i)start container\s+([^\s]+)").unwrap();
}

pub fn synthesize(query: &NormalizedQuery) -> Synthesis {
    if query.contains("list containers") {
        Synthesis::Command("docker ps -a".to_string())
    } else if query.contains("list images") {
        Synthesis::Command("docker images".to_string())
    } else if query.contains("start container") {
        match START_CONTAINER.captures(&query.raw) {
            Some(caps) => Synthesis::Command(format!("docker start {}", &caps[1])),
            None => Synthesis::Delegate,
        }
    } else {
        Synthesis::Delegate
    }
}
