// tests/router_tests.rs
// Routing, cleaning and classification end to end with a scripted backend

use insta::assert_json_snapshot;
use std::cell::RefCell;
use terminus::error::{Result, TerminusError};
use terminus::router::{AgentRouter, Outcome, Route, Source};
use terminus::workflows::{WorkflowMatcher, WorkflowRule};
use terminus::{Agent, Backend, ShellContext};

struct ScriptedBackend {
    answer: Option<String>,
    calls: RefCell<usize>,
}

impl Backend for ScriptedBackend {
    fn synthesize(&self, _prompt: &str, model: &str) -> Result<String> {
        assert_eq!(model, "llama3.2:3b");
        *self.calls.borrow_mut() += 1;
        self.answer
            .clone()
            .ok_or_else(|| TerminusError::Backend("model not loaded".into()))
    }
}

fn router_with(answer: Option<&str>, rules: &[WorkflowRule]) -> AgentRouter<ScriptedBackend> {
    AgentRouter::new(
        ScriptedBackend {
            answer: answer.map(str::to_string),
            calls: RefCell::new(0),
        },
        "llama3.2:3b",
        WorkflowMatcher::from_rules(rules),
        ShellContext::new("/home/grace", "grace", "/srv/app"),
    )
}

fn command(outcome: Outcome) -> String {
    match outcome {
        Outcome::Suggestion(s) => s.command,
        other => panic!("expected a command, got {:?}", other),
    }
}

#[test]
fn test_workflow_renders_groups_home_and_user() {
    let rules = vec![WorkflowRule::new(
        r"backup (\w+) to (\w+)",
        "tar czf {home}/{2}/{1}.tgz {1} && chown {user} {home}/{2}/{1}.tgz",
    )];
    let r = router_with(None, &rules);

    assert_eq!(
        command(r.suggest("Backup notes to archive")),
        "tar czf /home/grace/archive/notes.tgz notes && chown grace /home/grace/archive/notes.tgz"
    );
}

#[test]
fn test_first_matching_workflow_wins() {
    let rules = vec![
        WorkflowRule::new("deploy", "make deploy"),
        WorkflowRule::new("deploy (\\w+)", "make deploy-{1}"),
    ];
    let r = router_with(None, &rules);
    assert_eq!(command(r.suggest("deploy staging")), "make deploy");
}

#[test]
fn test_malformed_workflows_are_skipped() {
    let rules = vec![
        WorkflowRule::new("([unclosed", "never"),
        WorkflowRule {
            pattern: Some("status".into()),
            command: None,
        },
        WorkflowRule::new("status", "git status -sb"),
    ];
    let r = router_with(None, &rules);
    assert_eq!(command(r.suggest("repo status")), "git status -sb");
}

#[test]
fn test_hidden_files_without_backend() {
    let r = router_with(Some("should not be used"), &[]);
    assert_eq!(
        command(r.suggest("find hidden files in /tmp")),
        "find /tmp -type f -name '.*'"
    );
}

#[test]
fn test_install_and_ping() {
    let r = router_with(None, &[]);
    assert_eq!(command(r.suggest("install htop using apt")), "sudo apt-get install -y htop");
    assert_eq!(command(r.suggest("ping example.com")), "ping -c 4 example.com");
}

#[test]
fn test_history_is_not_a_command() {
    let r = router_with(Some("history"), &[]);
    assert_eq!(r.route("history"), Route::History);
    assert_eq!(r.suggest("  HISTORY "), Outcome::History);
}

#[test]
fn test_backend_answer_is_cleaned_and_resolved() {
    let r = router_with(Some("```sh\ndu -sh /path/to/logs\n```"), &[]);
    assert_eq!(command(r.suggest("how big are my logs")), "du -sh /srv/app/logs");
}

#[test]
fn test_backend_error_yields_no_command() {
    let r = router_with(None, &[]);
    match r.suggest("convert a video to gif") {
        Outcome::NoCommand(reason) => assert!(reason.contains("model not loaded")),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_harmful_backend_answer_is_flagged() {
    let r = router_with(Some("rm -rf ~"), &[]);
    match r.suggest("clean everything") {
        Outcome::Suggestion(s) => {
            assert!(s.harmful);
            assert_eq!(s.source, Source::Backend(None));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_project_path_is_not_harmful() {
    let r = router_with(Some("rm -rf /home/user/project"), &[]);
    match r.suggest("remove the old project") {
        Outcome::Suggestion(s) => assert!(!s.harmful),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_agent_suggestion_shape() {
    let r = router_with(None, &[]);
    let suggestion = match r.suggest("find hidden files in /tmp") {
        Outcome::Suggestion(s) => s,
        other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(suggestion.source, Source::Agent(Agent::File));

    assert_json_snapshot!(suggestion, @r###"
    {
      "command": "find /tmp -type f -name '.*'",
      "source": {
        "kind": "agent",
        "agent": "file"
      },
      "harmful": false
    }
    "###);
}
