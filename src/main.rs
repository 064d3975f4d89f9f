use anyhow::{Context, Result};
use clap::Parser;
use frailcare::assessment::FrailtyAssessment;
use frailcare::completions::OpenAIChatModel;
use frailcare::config::Config;
use frailcare::embeddings;
use frailcare::pipeline::CarePlanPipeline;
use frailcare::retrieval::PineconeRetriever;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a frailty care plan from assessment data", long_about = None)]
struct Args {
    /// Assessment input as a JSON object (PRISMA-7 survey, test results, uid)
    #[arg(long = "input_data")]
    input_data: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    frailcare::load_env();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "frailcare=info".to_string()))
        .init();

    let args = Args::parse();
    let assessment: FrailtyAssessment =
        serde_json::from_str(&args.input_data).context("Failed to parse --input_data JSON")?;

    let config = Config::load()?;
    let embedder = embeddings::create_embedder(&config.openai)?;
    let retriever = PineconeRetriever::new(
        config.index.api_key.clone(),
        config.index.host(),
        config.index.timeout_ms,
        embedder,
    )?;
    let chat_api_key = config
        .openai
        .api_key
        .clone()
        .context("OPENAI_API_KEY is not set")?;
    let chat = OpenAIChatModel::new(
        chat_api_key,
        config.openai.chat_model.clone(),
        config.openai.base_url.clone(),
        config.openai.timeout_ms,
    )?;

    let pipeline = CarePlanPipeline::new(
        Arc::new(retriever),
        Arc::new(chat),
        config.retrieval.top_k,
        config.plans.dir.clone(),
    );

    info!("Generating care plan for uid={}", assessment.uid);
    pipeline.generate(&assessment).await?;

    println!("Care plan generated successfully.");
    Ok(())
}
