//! Structured Logging - leveled, component-tagged log lines
//!
//! Every component reports through this module instead of printing
//! directly, so the interactive output stays clean and a session can be
//! captured as JSON lines with `--log-file`.
//!
//! Usage:
//!   use crate::slog_info;
//!
//!   slog_info!("ROUTER", "selected", json!({
//!       "query": "ping example.com",
//!       "agent": "network"
//!   }));
//!
//! JSON output (one object per line):
//!   {"timestamp":"2026-01-10T12:34:56Z","level":"info","component":"ROUTER","event":"selected","data":{"query":"ping example.com","agent":"network"}}

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
    static ref LOG_CONFIG: Mutex<LogConfig> = Mutex::new(LogConfig::default());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub component: String,
    pub event: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub json_output: bool,
    pub file_path: Option<PathBuf>,
    pub min_level: LogLevel,
    /// Mirror entries to stderr in addition to the log file
    pub echo_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            json_output: false,
            file_path: None,
            min_level: LogLevel::Warn,
            echo_stderr: true,
        }
    }
}

/// Initialize the structured logger
pub fn init_logger(config: LogConfig) {
    let file = config
        .file_path
        .as_ref()
        .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());

    if let Ok(mut log_file) = LOG_FILE.lock() {
        *log_file = file;
    }

    if let Ok(mut cfg) = LOG_CONFIG.lock() {
        *cfg = config;
    }
}

/// Log an event with structured data
pub fn log_event(level: LogLevel, component: &str, event: &str, data: serde_json::Value) {
    let config = match LOG_CONFIG.lock() {
        Ok(guard) => (*guard).clone(),
        Err(_) => LogConfig::default(),
    };

    if level < config.min_level {
        return;
    }

    let entry = LogEntry {
        timestamp: Utc::now(),
        level,
        component: component.to_string(),
        event: event.to_string(),
        data,
    };

    let output = format_entry(&entry, config.json_output);

    if config.echo_stderr {
        eprintln!("{}", output);
    }

    if let Ok(mut log_file) = LOG_FILE.lock() {
        if let Some(ref mut file) = *log_file {
            let _ = writeln!(file, "{}", output);
        }
    }
}

fn format_entry(entry: &LogEntry, json: bool) -> String {
    if json {
        return serde_json::to_string(entry).unwrap_or_else(|_| format!("{:?}", entry));
    }

    // [COMPONENT] event {data}
    format!("[{}] {} {}", entry.component, entry.event, entry.data)
}

#[macro_export]
macro_rules! slog_debug {
    ($component:expr, $event:expr, $data:expr) => {
        $crate::structured_log::log_event(
            $crate::structured_log::LogLevel::Debug,
            $component,
            $event,
            $data,
        )
    };
}

#[macro_export]
macro_rules! slog_info {
    ($component:expr, $event:expr, $data:expr) => {
        $crate::structured_log::log_event(
            $crate::structured_log::LogLevel::Info,
            $component,
            $event,
            $data,
        )
    };
}

#[macro_export]
macro_rules! slog_warn {
    ($component:expr, $event:expr, $data:expr) => {
        $crate::structured_log::log_event(
            $crate::structured_log::LogLevel::Warn,
            $component,
            $event,
            $data,
        )
    };
}

#[macro_export]
macro_rules! slog_error {
    ($component:expr, $event:expr, $data:expr) => {
        $crate::structured_log::log_event(
            $crate::structured_log::LogLevel::Error,
            $component,
            $event,
            $data,
        )
    };
}
