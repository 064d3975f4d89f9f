use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Chat completion client against an OpenAI-style endpoint. Temperature is
/// pinned to zero so repeated invocations stay deterministic.
pub struct OpenAIChatModel {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAIChatModel {
    pub fn new(api_key: String, model: String, base_url: String, timeout_ms: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .context("Failed to build reqwest client with timeout")?;
        Ok(Self {
            client,
            api_key,
            base_url,
            model,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAIChatModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(
            "Requesting chat completion (model={}, prompt chars={})",
            self.model,
            prompt.len()
        );

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ],
            "temperature": 0.0,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to the chat completions API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat completions API error {}: {}", status, error_text);
        }

        let v: Value = response
            .json()
            .await
            .context("Failed to parse chat completions response")?;

        v["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("No completion content returned"))
    }
}
