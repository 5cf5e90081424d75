use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use std::sync::OnceLock;

use crate::config::Config;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

pub struct ClaudeClient {
    client: Client,
    api_key: String,
    model: String,
    api_version: String,
}

impl ClaudeClient {
    pub fn get() -> &'static ClaudeClient {
        static INSTANCE: OnceLock<ClaudeClient> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let config = Config::get();
            let api_key = config
                .anthropic_api_key
                .clone()
                .expect("ANTHROPIC_API_KEY is not set");
            ClaudeClient::new(
                api_key,
                config.anthropic_model.clone(),
                config.anthropic_api_version.clone(),
            )
        })
    }

    pub fn new(api_key: String, model: String, api_version: String) -> Self {
        ClaudeClient {
            client: Client::new(),
            api_key,
            model,
            api_version,
        }
    }

    /// Runs one system + user prompt pair and returns the concatenated text
    /// blocks of the response.
    pub async fn run_prompt(&self, system: &str, user: &str) -> Result<String> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![Message {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<MessagesResponse>()
            .await?;

        let text = response
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(anyhow::anyhow!("No text content in model response"));
        }

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_blocks_are_joined() {
        let raw = serde_json::json!({
            "content": [
                { "type": "text", "text": "Half a tweet, " },
                { "type": "tool_use", "id": "x", "name": "y", "input": {} },
                { "type": "text", "text": "then the rest." },
            ]
        });

        let parsed: MessagesResponse = serde_json::from_value(raw).unwrap();
        let text = parsed
            .content
            .iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        assert_eq!(text, "Half a tweet, then the rest.");
    }
}
