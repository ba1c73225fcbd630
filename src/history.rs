//! Query history, persisted as a JSON array of `{query, command}`.

use crate::error::{Result, TerminusError};
use crate::slog_warn;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub command: String,
}

/// File-backed history capped at `max_size` entries, newest last.
pub struct HistoryStore {
    path: PathBuf,
    max_size: usize,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, max_size: usize) -> Self {
        Self {
            path: path.into(),
            max_size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries on disk; a missing or corrupt file reads as empty.
    pub fn load(&self) -> Vec<HistoryEntry> {
        if !self.path.exists() {
            return Vec::new();
        }

        let parsed = File::open(&self.path)
            .map_err(TerminusError::from)
            .and_then(|file| serde_json::from_reader(BufReader::new(file)).map_err(TerminusError::from));

        match parsed {
            Ok(entries) => entries,
            Err(e) => {
                slog_warn!("HISTORY", "load_failed", json!({
                    "path": self.path.display().to_string(),
                    "error": e.to_string(),
                }));
                Vec::new()
            }
        }
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.flush()?;
        Ok(())
    }

    /// Append an entry and keep only the newest `max_size`.
    pub fn record(&self, query: &str, command: &str) -> Result<()> {
        let mut entries = self.load();
        entries.push(HistoryEntry {
            query: query.to_string(),
            command: command.to_string(),
        });

        let overflow = entries.len().saturating_sub(self.max_size);
        entries.drain(..overflow);

        self.save(&entries)
            .map_err(|e| TerminusError::History(format!("Error saving history: {}", e)))
    }

    pub fn display(&self, out: &mut dyn Write) -> std::io::Result<()> {
        let entries = self.load();
        if entries.is_empty() {
            return writeln!(out, "No history yet.");
        }

        writeln!(out, "\nCommand History:")?;
        for (i, entry) in entries.iter().enumerate() {
            writeln!(out, "{}. Query: {}\n   Command: {}\n", i + 1, entry.query, entry.command)?;
        }
        Ok(())
    }
}
