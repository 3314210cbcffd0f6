//! Suggestion fetching from the chat-completion API.
//!
//! Sends the user's task description to the completion endpoint and turns
//! the free-form response into a list of clean candidate commands. Every
//! failure mode is folded into [`SuggestError`]; callers decide how to
//! present it and continue with an empty list.

use crate::config::Config;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_TOKENS: u32 = 500;

const SYSTEM_PROMPT: &str = "You are a helpful CLI assistant. Provide practical shell \
     commands for the user's task. Return valid shell commands only, one per line, no \
     explanations. Do not include numbers, backticks or formatting, just return the raw \
     commands.";

/// Why a suggestion fetch produced nothing.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// No API key configured; checked before any network I/O.
    #[error("API key not configured. Run `aicmd --setup` or set the {} environment variable.", crate::config::API_KEY_ENV)]
    AuthMissing,
    /// Transport failure, non-success status, or malformed response body.
    #[error("Error getting suggestions: {0}")]
    Service(String),
}

/// Client for the suggestion endpoint.
pub struct SuggestionClient {
    client: Client,
    api_key: String,
    model: String,
    max_suggestions: u32,
}

impl SuggestionClient {
    /// Build a client from the loaded configuration.
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_suggestions: config.max_suggestions,
        }
    }

    /// Fetch command suggestions for a natural-language query.
    pub async fn suggestions(&self, query: &str) -> Result<Vec<String>, SuggestError> {
        if self.api_key.is_empty() {
            return Err(SuggestError::AuthMissing);
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!(
                        "Suggest {} shell commands for: {}",
                        self.max_suggestions, query
                    ),
                },
            ],
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| SuggestError::Service(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ChatError>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SuggestError::Service(format!("{}: {}", status, message)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| SuggestError::Service(format!("Malformed response: {}", e)))?;

        let content = chat_response
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| SuggestError::Service("Empty response".to_string()))?;

        let suggestions = clean_lines(content);
        debug!("Received {} suggestions", suggestions.len());
        Ok(suggestions)
    }
}

/// Split response text into clean command candidates, preserving order.
///
/// Each line loses a leading list-numbering prefix (`digits` + one of
/// `.`, `)`, `-` + optional whitespace) and every backtick; lines that end
/// up empty are dropped.
fn clean_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            strip_numbering(line.trim())
                .replace('`', "")
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Strip a leading `<digits><.|)|-><optional whitespace>` prefix.
fn strip_numbering(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return line;
    }
    match rest.strip_prefix(['.', ')', '-']) {
        Some(after) => after.trim_start(),
        None => line,
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatError {
    error: ChatErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ChatErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_lines_strips_numbering_and_backticks() {
        let text = "1. ls -la\n2) du -sh *`du -sh *`\n\n  ";
        assert_eq!(clean_lines(text), vec!["ls -la", "du -sh *du -sh *"]);
    }

    #[test]
    fn test_clean_lines_prefix_variants() {
        assert_eq!(clean_lines("3- df -h"), vec!["df -h"]);
        assert_eq!(clean_lines("12.   find . -type f"), vec!["find . -type f"]);
        assert_eq!(clean_lines("2)tar czf a.tgz ."), vec!["tar czf a.tgz ."]);
    }

    #[test]
    fn test_clean_lines_only_leading_numbering() {
        // A digit sequence mid-line is part of the command.
        assert_eq!(clean_lines("head -n 5. file"), vec!["head -n 5. file"]);
        // Bare digits have no prefix punctuation, so they survive.
        assert_eq!(clean_lines("42"), vec!["42"]);
    }

    #[test]
    fn test_clean_lines_preserves_order() {
        let text = "1. first\n2. second\n3. third";
        assert_eq!(clean_lines(text), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_clean_lines_empty_input() {
        assert!(clean_lines("").is_empty());
        assert!(clean_lines("   \n\t\n").is_empty());
        // A line that is nothing but numbering and backticks disappears.
        assert!(clean_lines("1. ``").is_empty());
    }

    #[test]
    fn test_strip_numbering_requires_punctuation() {
        assert_eq!(strip_numbering("7z x archive.7z"), "7z x archive.7z");
        assert_eq!(strip_numbering("1. ls"), "ls");
        assert_eq!(strip_numbering("ls -la"), "ls -la");
    }

    #[tokio::test]
    async fn test_auth_missing_before_network() {
        let config = Config::default();
        let client = SuggestionClient::new(&config);
        let result = client.suggestions("list files").await;
        assert!(matches!(result, Err(SuggestError::AuthMissing)));
    }
}
