pub mod assessment;
pub mod completions;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod pipeline;
pub mod plans;
pub mod prompts;
pub mod retrieval;

// Loads .env if present and silently ignores if missing.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}
