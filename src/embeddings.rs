use crate::config::OpenAiConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
    fn dimensions(&self) -> usize;
}

// OpenAI API implementation
pub struct OpenAIEmbedder {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    dims: usize,
}

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct OpenAIResponseData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    data: Vec<OpenAIResponseData>,
}

impl OpenAIEmbedder {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout_ms: u64,
        dims: Option<usize>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .context("Failed to build reqwest client with timeout")?;

        let dims = dims.unwrap_or(match model.as_str() {
            // Known OpenAI embedding dims
            "text-embedding-ada-002" => 1536,
            "text-embedding-3-small" => 1536,
            "text-embedding-3-large" => 3072,
            _ => 1536,
        });

        Ok(Self {
            client,
            api_key,
            base_url,
            model,
            dims,
        })
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(
            "Generating OpenAI embedding (model={}, chars={})",
            self.model,
            text.len()
        );

        let body = OpenAIRequest {
            model: &self.model,
            input: text,
        };

        // Single attempt: a failed embedding fails the whole invocation
        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to the embeddings API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Embeddings API error {}: {}", status, error_text);
        }

        let result: OpenAIResponse = response
            .json()
            .await
            .context("Failed to parse embeddings response")?;

        result
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .context("No embedding returned from the embeddings API")
    }

    fn dimensions(&self) -> usize {
        self.dims
    }
}

// Deterministic, local FakeEmbedder for testing/dev (no network)
pub struct FakeEmbedder {
    dims: usize,
}

impl FakeEmbedder {
    pub fn new(dims: Option<usize>) -> Self {
        let d = dims.unwrap_or(1536).max(1);
        Self { dims: d }
    }

    // Produce a stable stream of pseudo-random f32 values, unit-normalized
    fn generate(&self, text: &str) -> Vec<f32> {
        use sha2::{Digest, Sha256};
        let mut out = Vec::with_capacity(self.dims);
        let mut i: u32 = 0;
        while out.len() < self.dims {
            // hash(text || i)
            let mut hasher = Sha256::new();
            hasher.update(text.as_bytes());
            hasher.update(i.to_le_bytes());
            let digest = hasher.finalize();
            for chunk in digest.chunks(4) {
                if out.len() >= self.dims {
                    break;
                }
                let mut bytes = [0u8; 4];
                bytes.copy_from_slice(chunk);
                let val_u32 = u32::from_le_bytes(bytes);
                let v01 = (val_u32 as f32) / (u32::MAX as f32 + 1.0);
                out.push(v01 * 2.0 - 1.0);
            }
            i = i.wrapping_add(1);
        }

        let norm: f32 = out.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut out {
                *v /= norm;
            }
        }
        out
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.generate(text))
    }

    fn dimensions(&self) -> usize {
        self.dims
    }
}

// Factory function to create embedder based on configuration
pub fn create_embedder(cfg: &OpenAiConfig) -> Result<Arc<dyn Embedder>> {
    let is_placeholder = |s: &str| {
        let t = s.trim();
        t.is_empty()
            || t.contains("${")
            || t.eq_ignore_ascii_case("your-api-key-here")
            || t.eq_ignore_ascii_case("changeme")
    };

    match cfg.embedding_provider.as_str() {
        "openai" => {
            let key = cfg.api_key.clone().unwrap_or_default();
            if is_placeholder(&key) {
                anyhow::bail!("FRAIL_EMBED_PROVIDER=openai but OPENAI_API_KEY is not set");
            }
            info!("Using OpenAI embeddings (model={})", cfg.embedding_model);
            Ok(Arc::new(OpenAIEmbedder::new(
                key,
                cfg.embedding_model.clone(),
                cfg.base_url.clone(),
                cfg.timeout_ms,
                None,
            )?))
        }
        "fake" => {
            let fake = FakeEmbedder::new(None);
            info!(
                "Using FakeEmbedder (deterministic) with {} dimensions",
                fake.dimensions()
            );
            Ok(Arc::new(fake))
        }
        other => anyhow::bail!("Unknown embedding provider: {other}"),
    }
}
