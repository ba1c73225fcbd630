//! Harmfulness classifier for fully resolved commands.
//!
//! The blocklist is deliberately small: recursive force deletes whose target
//! is the filesystem root or the home shorthand. It is advisory. A hit only
//! changes which confirmation prompt the execution gate shows.

use regex::Regex;

/// A named destructive pattern.
pub struct HarmfulPattern {
    pub name: &'static str,
    pub regex: Regex,
}

// The target must be the whole argument: `rm -rf /` and `rm -rf ~/` are
// caught, `rm -rf /home/ada/project` and `rm -rf ~/build` are not. Quotes
// count as boundaries so `sh -c 'rm -rf /'` is caught too.
const TARGET_END: &str = r#"(?:$|[\s;&|)'"])"#;
const COMMAND_START: &str = r#"(?:^|[\s;&|('"])"#;

lazy_static::lazy_static! {
    static ref HARMFUL_PATTERNS: Vec<HarmfulPattern> = vec![
        HarmfulPattern {
            name: "sudo-rm-rf-root",
            regex: Regex::new(&format!(r"{}sudo\s+rm\s+-rf\s+/{}", COMMAND_START, TARGET_END)).unwrap(),
        },
        HarmfulPattern {
            name: "rm-rf-root",
            regex: Regex::new(&format!(r"{}rm\s+-rf\s+/{}", COMMAND_START, TARGET_END)).unwrap(),
        },
        HarmfulPattern {
            name: "rm-rf-home",
            regex: Regex::new(&format!(r"{}rm\s+-rf\s+~/?{}", COMMAND_START, TARGET_END)).unwrap(),
        },
    ];
}

/// The fixed, ordered pattern set.
pub fn harmful_patterns() -> &'static [HarmfulPattern] {
    &HARMFUL_PATTERNS
}

/// Name of the first pattern the command matches, if any.
pub fn matched_pattern(command: &str) -> Option<&'static str> {
    harmful_patterns()
        .iter()
        .find(|p| p.regex.is_match(command))
        .map(|p| p.name)
}

pub fn is_command_harmful(command: &str) -> bool {
    matched_pattern(command).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_delete_is_harmful() {
        assert!(is_command_harmful("rm -rf /"));
        assert!(is_command_harmful("rm  -rf   / --no-preserve-root"));
        assert_eq!(matched_pattern("rm -rf /"), Some("rm-rf-root"));
    }

    #[test]
    fn test_sudo_root_delete_is_harmful() {
        assert!(is_command_harmful("sudo rm -rf /"));
        assert_eq!(matched_pattern("sudo rm -rf /"), Some("sudo-rm-rf-root"));
    }

    #[test]
    fn test_home_delete_is_harmful() {
        assert!(is_command_harmful("rm -rf ~"));
        assert!(is_command_harmful("rm -rf ~/"));
        assert!(is_command_harmful("cd /tmp && rm -rf ~"));
    }

    #[test]
    fn test_quoted_deletes_are_harmful() {
        assert!(is_command_harmful("sh -c 'rm -rf /'"));
        assert!(is_command_harmful("bash -c \"rm -rf ~\""));
        assert!(is_command_harmful("sudo sh -c 'rm -rf ~/'"));
        assert!(is_command_harmful("bash -c \"sudo rm -rf /\""));
        assert!(!is_command_harmful("sh -c 'rm -rf /home/user/project'"));
        assert!(!is_command_harmful("echo 'rm -rf ~/build'"));
    }

    #[test]
    fn test_scoped_deletes_are_not_harmful() {
        assert!(!is_command_harmful("rm -rf /home/user/project"));
        assert!(!is_command_harmful("rm -rf ~/build"));
        assert!(!is_command_harmful("rm -rf ./target"));
        assert!(!is_command_harmful("ls -la /"));
    }

    #[test]
    fn test_pattern_order_is_fixed() {
        let names: Vec<_> = harmful_patterns().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["sudo-rm-rf-root", "rm-rf-root", "rm-rf-home"]);
    }
}
