//! Package installs through apt, yum or pip.

use super::Synthesis;
use crate::normalize::NormalizedQuery;
use regex::Regex;

lazy_static::lazy_static! {
    // Tried in this order; the first manager named after the package wins.
    static ref INSTALLERS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)install\s+([^\s]+).*apt").unwrap(), "sudo apt-get install -y"),
        (Regex::new(r"(?i)install\s+([^\s]+).*yum").unwrap(), "sudo yum install -y"),
        (Regex::new(r"(?i)install\s+([^\s]+).*pip").unwrap(), "pip install"),
    ];
}

pub fn synthesize(query: &NormalizedQuery) -> Synthesis {
    if !query.contains("install") {
        return Synthesis::Delegate;
    }

    for (re, install) in INSTALLERS.iter() {
        if let Some(caps) = re.captures(&query.raw) {
            return Synthesis::Command(format!("{} {}", install, &caps[1]));
        }
    }
    Synthesis::Delegate
}
