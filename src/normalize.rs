//! Query normalization for keyword routing.
//!
//! Keyword tests are substring tests over the lowercased query, so
//! "pinging" still counts as "ping". The raw query is kept untouched for the
//! agents' regex extraction, which must preserve path casing.

/// A query prepared for keyword tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// The original input, untouched.
    pub raw: String,
    /// The whole input, lowercased.
    pub text: String,
    /// Lowercased whitespace-separated tokens.
    pub tokens: Vec<String>,
}

impl NormalizedQuery {
    pub fn new(input: &str) -> Self {
        let text = input.to_lowercase();
        let tokens = text.split_whitespace().map(str::to_string).collect();

        Self {
            raw: input.to_string(),
            text,
            tokens,
        }
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.text.contains(keyword)
    }

    pub fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.contains(k))
    }

    pub fn contains_all(&self, keywords: &[&str]) -> bool {
        keywords.iter().all(|k| self.contains(k))
    }

    /// The bare word `history`, ignoring case and surrounding whitespace.
    pub fn is_history_request(&self) -> bool {
        self.text.trim() == "history"
    }
}
