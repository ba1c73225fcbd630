//! System resource snapshots.

use super::Synthesis;
use crate::normalize::NormalizedQuery;

pub fn synthesize(query: &NormalizedQuery) -> Synthesis {
    if query.contains_any(&["cpu", "memory"]) {
        Synthesis::Command("top -b -n 1".to_string())
    } else if query.contains("disk") {
        Synthesis::Command("df -h".to_string())
    } else {
        Synthesis::Delegate
    }
}
