// src/llm/client.rs

use crate::config::CONFIG;
use crate::llm::generate::TextGenerator;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::env;

#[derive(Clone)]
pub struct OpenAIClient {
    pub client: Client,
    pub api_key: String,
    pub api_base: String,
}

impl OpenAIClient {
    pub fn new() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;

        Ok(Self {
            client: Client::new(),
            api_key,
            api_base: CONFIG.openai_base_url.clone(),
        })
    }

    pub fn auth_header(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.api_key))
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Single-prompt chat completion returning plain text.
    pub async fn completion(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "model": CONFIG.chat_model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": CONFIG.chat_temperature,
        });

        let resp = self
            .client
            .post(self.endpoint("chat/completions"))
            .header(self.auth_header().0, self.auth_header().1.clone())
            .json(&body)
            .send()
            .await
            .context("Failed to send chat request")?;

        if !resp.status().is_success() {
            return Err(anyhow!(
                "completion request failed: {}",
                resp.text().await.unwrap_or_default()
            ));
        }

        let resp_json: Value = resp.json().await.context("Failed to parse chat response")?;

        let content = resp_json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("No content in chat response"))?
            .to_string();

        Ok(content)
    }
}

#[async_trait]
impl TextGenerator for OpenAIClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.completion(prompt).await
    }
}
