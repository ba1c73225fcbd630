//! Generative backend: natural-language prompt in, shell command out.
//!
//! The router only sees the `Backend` trait. `OllamaBackend` talks to a
//! local Ollama server over its chat endpoint and blocks until the model
//! answers.

use crate::error::{Result, TerminusError};
use crate::{slog_debug, slog_error};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

const SYSTEM_PROMPT: &str = "You are a helpful assistant that provides terminal commands.";

/// Anything that can turn a prompt into a command string.
pub trait Backend {
    fn synthesize(&self, prompt: &str, model: &str) -> Result<String>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn synthesize(&self, prompt: &str, model: &str) -> Result<String> {
        (**self).synthesize(prompt, model)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn synthesize(&self, prompt: &str, model: &str) -> Result<String> {
        (**self).synthesize(prompt, model)
    }
}

/// Build the instruction sent for a query.
pub fn build_prompt(query: &str) -> String {
    format!(
        "You are a CLI command expert. The user is asking for a command to: {query}\n\
         \n\
         If the query involves file operations, ensure that hidden files and directories are considered.\n\
         If the query involves a specific directory, use the FULL ABSOLUTE PATH to that directory.\n\
         Respond STRICTLY with ONLY the command to execute in bash/zsh.\n\
         NO explanations, NO markdown, ONLY the command itself."
    )
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

pub struct OllamaBackend {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl OllamaBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

impl Default for OllamaBackend {
    fn default() -> Self {
        Self::new(DEFAULT_OLLAMA_URL)
    }
}

impl Backend for OllamaBackend {
    fn synthesize(&self, prompt: &str, model: &str) -> Result<String> {
        let request_body = ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            stream: false,
        };

        slog_debug!("OLLAMA", "request", json!({ "model": model, "url": self.chat_url() }));

        let response = self
            .client
            .post(self.chat_url())
            .json(&request_body)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                slog_error!("OLLAMA", "request_failed", json!({ "error": e.to_string() }));
                TerminusError::Backend(format!("Ollama request failed: {}", e))
            })?
            .json::<ChatResponse>()
            .map_err(|e| TerminusError::Backend(format!("Failed to parse response: {}", e)))?;

        Ok(response.message.content.trim().to_string())
    }
}
