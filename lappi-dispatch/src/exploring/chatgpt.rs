//! ChatGPT exploring source
//!
//! Asks an OpenAI chat-completions endpoint for the history of an artist in a
//! single turn and returns the generated text verbatim. No streaming, no
//! retries, no token-limit handling.

use async_trait::async_trait;
use lappi_common::config::ExploringConfig;
use lappi_common::{Error, Registry, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{build_http_client, check_status, read_user_token, transport_error, ExploringSource};

pub const SOURCE_NAME: &str = "chatgpt";

/// Registry key holding the OpenAI API key
pub const USER_TOKEN_KEY: &str = "exploring.sources.chatgpt.user_token";

const USER_AGENT: &str = concat!("lappi-dispatch/", env!("CARGO_PKG_VERSION"));

const SYSTEM_PROMPT: &str = "You are a intelligent assistant.";

/// Chat-completions request body
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatMessage {
    fn new(role: &str, content: String) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content),
        }
    }
}

/// Chat-completions response (only the fields used here)
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

/// User prompt asking for the history of `artist_name`
pub fn artist_history_prompt(artist_name: &str) -> String {
    format!(
        "Hi, could you please tell me a history of music artist \"{}\"?",
        artist_name
    )
}

/// OpenAI client scoped to one API key
pub struct ChatGptSource {
    http_client: reqwest::Client,
    api_url: String,
    model: String,
    user_token: String,
}

impl ChatGptSource {
    /// `api_url` is the full chat-completions endpoint
    pub fn new(
        user_token: String,
        api_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            http_client: build_http_client(timeout, USER_AGENT)?,
            api_url: api_url.into(),
            model: model.into(),
            user_token,
        })
    }

    /// Build from the token stored under [`USER_TOKEN_KEY`]
    pub fn from_registry(registry: &Registry, config: &ExploringConfig) -> Result<Self> {
        let user_token = read_user_token(registry, USER_TOKEN_KEY)?;
        Self::new(
            user_token,
            config.chatgpt_api_url.clone(),
            config.chatgpt_model.clone(),
            config.request_timeout(),
        )
    }

    fn build_request(&self, artist_name: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::new("system", SYSTEM_PROMPT.to_string()),
                ChatMessage::new("user", artist_history_prompt(artist_name)),
            ],
            temperature: 0.0,
        }
    }
}

#[async_trait]
impl ExploringSource for ChatGptSource {
    fn source_name(&self) -> &str {
        SOURCE_NAME
    }

    async fn get_artist_description(&self, artist_name: &str) -> Result<String> {
        let body = self.build_request(artist_name);
        debug!(artist = %artist_name, model = %self.model, "Requesting artist history");

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(&self.user_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(SOURCE_NAME, e))?;

        let completion: ChatResponse = check_status(SOURCE_NAME, response)
            .await?
            .json()
            .await
            .map_err(|e| transport_error(SOURCE_NAME, e))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                Error::upstream(SOURCE_NAME, None, "completion contained no message content")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> ChatGptSource {
        ChatGptSource::new(
            "sk-test".to_string(),
            "https://api.openai.com/v1/chat/completions",
            "gpt-3.5-turbo",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_prompt_quotes_artist_name() {
        assert_eq!(
            artist_history_prompt("Nina Simone"),
            "Hi, could you please tell me a history of music artist \"Nina Simone\"?"
        );
    }

    #[test]
    fn test_build_request_single_turn() {
        let request = source().build_request("Nina Simone");
        assert_eq!(request.model, "gpt-3.5-turbo");
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[0].content.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(request.messages[1].role, "user");
    }

    #[test]
    fn test_request_serializes_without_stream_flag() {
        let value = serde_json::to_value(source().build_request("X")).unwrap();
        assert!(value.get("stream").is_none());
        assert_eq!(value["messages"][1]["content"], artist_history_prompt("X"));
    }

    #[test]
    fn test_capabilities_reserved() {
        assert!(source().capabilities().is_none());
    }
}
