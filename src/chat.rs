//! Chat-completion client for title translation and article summaries
//!
//! Talks to any OpenAI-compatible endpoint (`POST {base}/chat/completions`
//! with bearer auth). The client is constructed explicitly from [`ChatConfig`]
//! and injected where needed, so nothing in the library depends on a
//! process-wide singleton.

use crate::config::ChatConfig;
use crate::error::{Error, Result};
use serde::Deserialize;

const SUMMARIZE_PROMPT: &str = "You are a helpful assistant that summarizes articles. \
    Summarize the following content concisely, with no extra explanation.";

const TRANSLATE_PROMPT: &str = "You are a professional translator. Translate the following \
    text to Simplified Chinese and reply with the translation only, no extra explanation.";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Chat-completion client
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    model: String,
}

impl ChatClient {
    /// Create a client from service credentials
    pub fn new(client: reqwest::Client, config: ChatConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token,
            model: config.model,
        }
    }

    async fn complete(&self, system_prompt: &str, content: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": content},
            ],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url,
            });
        }

        let payload: ChatResponse = response.json().await?;
        payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::ChatCompletion("no choices in response".to_string()))
    }

    /// Summarize article content
    ///
    /// # Errors
    /// Returns error on network failure, a non-success status, or an empty
    /// choice list.
    pub async fn summarize(&self, content: &str) -> Result<String> {
        self.complete(SUMMARIZE_PROMPT, content).await
    }

    /// Translate text to Simplified Chinese
    ///
    /// # Errors
    /// Returns error on network failure, a non-success status, or an empty
    /// choice list.
    pub async fn translate(&self, content: &str) -> Result<String> {
        self.complete(TRANSLATE_PROMPT, content).await
    }
}
