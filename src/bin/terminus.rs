/*!
 * terminus CLI
 *
 * Interactive assistant that turns plain-English requests into shell
 * commands, plus one-shot `suggest` and `history` subcommands for scripting.
 */

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use terminus::gate::{ExecutionGate, ExecutionPolicy};
use terminus::line_editor::{LineEditor, LineSource, ReaderInput};
use terminus::router::{AgentRouter, Outcome};
use terminus::structured_log::{init_logger, LogConfig, LogLevel};
use terminus::ui::Palette;
use terminus::{slog_info, Config, HistoryStore, OllamaBackend, Session, ShellContext, ShellRunner};

#[derive(Parser)]
#[command(name = "terminus")]
#[command(about = "Natural language to shell commands", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/terminusai/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model to ask when no agent can build the command
    #[arg(long, global = true)]
    model: Option<String>,

    /// Simulate every command for this session
    #[arg(long, global = true)]
    safe: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Append JSON log lines to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive session (default)
    Repl,

    /// Print the command for a query without running it
    Suggest {
        #[arg(required = true, trailing_var_arg = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Show recorded queries and commands
    History,

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    init_logger(LogConfig {
        json_output: cli.log_file.is_some(),
        file_path: cli.log_file.clone(),
        min_level: if cli.verbose { LogLevel::Debug } else { LogLevel::Warn },
        echo_stderr: cli.log_file.is_none() || cli.verbose,
    });

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> Config {
    let path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(&path);
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if cli.no_color {
        config.enable_colors = false;
    }
    config
}

fn run(cli: Cli) -> Result<i32> {
    let config = load_config(&cli);
    let history = HistoryStore::new(Config::history_path(), config.history_size);

    match cli.command {
        None | Some(Commands::Repl) => {
            run_repl(&config, history, cli.safe)?;
            Ok(0)
        }
        Some(Commands::Suggest { query }) => suggest(&config, &history, &query.join(" ")),
        Some(Commands::History) => {
            history
                .display(&mut io::stdout().lock())
                .context("failed to print history")?;
            Ok(0)
        }
        Some(Commands::Version) => {
            println!("terminus v{}", env!("CARGO_PKG_VERSION"));
            println!("Natural language to shell commands");
            Ok(0)
        }
    }
}

fn build_router(config: &Config) -> AgentRouter<OllamaBackend> {
    let workflows = config.workflow_matcher(Config::workflows_dir());
    AgentRouter::new(
        OllamaBackend::new(config.ollama_url.clone()),
        config.model.clone(),
        workflows,
        ShellContext::from_process(),
    )
}

fn suggest(config: &Config, history: &HistoryStore, query: &str) -> Result<i32> {
    let router = build_router(config);

    match router.suggest(query) {
        Outcome::Suggestion(suggestion) => {
            if suggestion.harmful {
                eprintln!("Warning: Detected potentially harmful command.");
            }
            println!("{}", suggestion.command);
            Ok(0)
        }
        Outcome::History => {
            history
                .display(&mut io::stdout().lock())
                .context("failed to print history")?;
            Ok(0)
        }
        Outcome::NoCommand(reason) => {
            eprintln!("Error from LLM: {}", reason);
            Ok(1)
        }
    }
}

fn run_repl(config: &Config, history: HistoryStore, force_safe: bool) -> Result<()> {
    let palette = Palette::new(config.enable_colors);

    let mut policy = ExecutionPolicy::from_config(config);
    policy.safe_mode |= force_safe;

    slog_info!("CLI", "session_start", serde_json::json!({
        "model": config.model,
        "safe_mode": policy.safe_mode,
        "confirm_execution": policy.confirm_execution,
    }));

    let session = Session::new(
        build_router(config),
        ExecutionGate::new(policy, ShellRunner::default(), palette),
        history,
        palette,
    );

    let mut input: Box<dyn LineSource> = if io::stdin().is_terminal() {
        Box::new(LineEditor::new().context("failed to start line editor")?)
    } else {
        Box::new(ReaderInput::new(io::stdin().lock(), io::stdout()))
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    session.run(input.as_mut(), &mut out)?;
    out.flush()?;
    Ok(())
}
