//! Similarity retrieval against the external vector index

use crate::embeddings::Embedder;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// One reference passage returned by the index. Metadata fields are
/// optional; a missing source becomes "Unknown" in the citation list.
#[derive(Debug, Clone)]
pub struct RetrievedDocument {
    pub text: Option<String>,
    pub source: Option<String>,
    pub score: f32,
}

#[async_trait]
pub trait DocumentRetriever: Send + Sync {
    async fn similar(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedDocument>>;
}

/// Pinecone-backed retriever: embeds the query text, then asks the index
/// for the nearest stored documents with their metadata.
pub struct PineconeRetriever {
    client: reqwest::Client,
    api_key: String,
    host: String,
    embedder: Arc<dyn Embedder>,
}

#[derive(Serialize)]
struct QueryRequest {
    vector: Vec<f32>,
    #[serde(rename = "topK")]
    top_k: usize,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<MatchMetadata>,
}

#[derive(Deserialize, Default)]
struct MatchMetadata {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

impl PineconeRetriever {
    pub fn new(
        api_key: String,
        host: String,
        timeout_ms: u64,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .context("Failed to build reqwest client with timeout")?;
        Ok(Self {
            client,
            api_key,
            host,
            embedder,
        })
    }
}

#[async_trait]
impl DocumentRetriever for PineconeRetriever {
    async fn similar(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedDocument>> {
        let vector = self
            .embedder
            .embed(query)
            .await
            .context("Failed to embed retrieval query")?;

        debug!("Querying index (top_k={}, dim={})", top_k, vector.len());

        let body = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };

        let response = self
            .client
            .post(format!("{}/query", self.host))
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send query to the vector index")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Vector index error {}: {}", status, error_text);
        }

        let result: QueryResponse = response
            .json()
            .await
            .context("Failed to parse vector index response")?;

        Ok(result
            .matches
            .into_iter()
            .map(|m| {
                let metadata = m.metadata.unwrap_or_default();
                RetrievedDocument {
                    text: metadata.text,
                    source: metadata.source,
                    score: m.score,
                }
            })
            .collect())
    }
}
