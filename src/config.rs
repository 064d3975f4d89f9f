use anyhow::Result;
use std::path::PathBuf;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";
pub const DEFAULT_EMBED_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_PLAN_DIR: &str = "/home/ubuntu/UserPlan";

const DEFAULT_TIMEOUT_MS: u64 = 60_000;
const DEFAULT_TOP_K: usize = 10;

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub index: IndexConfig,
    pub retrieval: RetrievalConfig,
    pub plans: PlanStoreConfig,
}

/// OpenAI endpoint configuration shared by the embedding and chat clients
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub embedding_provider: String,
    pub timeout_ms: u64,
}

/// Vector index connection values, all three required at startup
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub api_key: String,
    pub environment: String,
    pub index_name: String,
    pub host_override: Option<String>,
    pub timeout_ms: u64,
}

impl IndexConfig {
    /// Query endpoint host for the configured index.
    pub fn host(&self) -> String {
        match &self.host_override {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!(
                "https://{}.svc.{}.pinecone.io",
                self.index_name, self.environment
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    pub top_k: usize,
}

#[derive(Debug, Clone)]
pub struct PlanStoreConfig {
    pub dir: PathBuf,
}

/// Plan output directory, shared with the read-back binary.
pub fn plan_dir_from_env() -> PathBuf {
    std::env::var("FRAIL_PLAN_DIR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PLAN_DIR))
}

fn required(name: &str) -> Result<String> {
    let value = std::env::var(name).unwrap_or_default();
    if value.trim().is_empty() {
        anyhow::bail!("{name} is not set");
    }
    Ok(value)
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Config {
    /// Load configuration from the environment. The three index values are
    /// required and a missing one fails the invocation up front.
    pub fn load() -> Result<Self> {
        let timeout_ms = std::env::var("FRAIL_HTTP_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&t| t > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let openai = OpenAiConfig {
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            base_url: env_or("FRAIL_OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            chat_model: env_or("FRAIL_CHAT_MODEL", DEFAULT_CHAT_MODEL),
            embedding_model: env_or("FRAIL_EMBED_MODEL", DEFAULT_EMBED_MODEL),
            embedding_provider: env_or("FRAIL_EMBED_PROVIDER", "openai"),
            timeout_ms,
        };

        let index = IndexConfig {
            api_key: required("PINECONE_API_KEY")?,
            environment: required("PINECONE_ENVIRONMENT")?,
            index_name: required("INDEX_NAME")?,
            host_override: std::env::var("FRAIL_INDEX_HOST")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            timeout_ms,
        };

        let retrieval = RetrievalConfig {
            top_k: std::env::var("FRAIL_TOP_K")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .map(|k| k.clamp(1, 50))
                .unwrap_or(DEFAULT_TOP_K),
        };

        let plans = PlanStoreConfig {
            dir: plan_dir_from_env(),
        };

        let config = Self {
            openai,
            index,
            retrieval,
            plans,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(1..=50).contains(&self.retrieval.top_k) {
            anyhow::bail!("FRAIL_TOP_K must be between 1 and 50");
        }
        if self.openai.base_url.trim().is_empty() {
            anyhow::bail!("FRAIL_OPENAI_BASE_URL must not be empty");
        }
        if self.openai.timeout_ms == 0 {
            anyhow::bail!("FRAIL_HTTP_TIMEOUT_MS must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_config(host_override: Option<&str>) -> IndexConfig {
        IndexConfig {
            api_key: "key".to_string(),
            environment: "us-east1-gcp".to_string(),
            index_name: "frailty-kb".to_string(),
            host_override: host_override.map(str::to_string),
            timeout_ms: 1000,
        }
    }

    #[test]
    fn host_derived_from_index_and_environment() {
        let cfg = index_config(None);
        assert_eq!(cfg.host(), "https://frailty-kb.svc.us-east1-gcp.pinecone.io");
    }

    #[test]
    fn host_override_wins_and_drops_trailing_slash() {
        let cfg = index_config(Some("https://example.test/"));
        assert_eq!(cfg.host(), "https://example.test");
    }
}
