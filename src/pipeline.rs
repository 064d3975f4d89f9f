//! Two-stage retrieval-augmented care-plan generation

use crate::assessment::FrailtyAssessment;
use crate::completions::ChatModel;
use crate::error::{FrailcareError, Result};
use crate::plans;
use crate::prompts;
use crate::retrieval::{DocumentRetriever, RetrievedDocument};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Stage-1 output: the model's factual analysis plus the documents it was
/// grounded on. Passed by value into stage 2.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub text: String,
    pub sources: Vec<RetrievedDocument>,
}

/// Orchestrates the fixed call sequence: retrieve, analyze, synthesize,
/// persist. Collaborators sit behind trait objects so each stage can be
/// driven with stubs.
pub struct CarePlanPipeline {
    retriever: Arc<dyn DocumentRetriever>,
    chat: Arc<dyn ChatModel>,
    top_k: usize,
    plan_dir: PathBuf,
}

impl CarePlanPipeline {
    pub fn new(
        retriever: Arc<dyn DocumentRetriever>,
        chat: Arc<dyn ChatModel>,
        top_k: usize,
        plan_dir: PathBuf,
    ) -> Self {
        Self {
            retriever,
            chat,
            top_k,
            plan_dir,
        }
    }

    /// Stage 1: ground a factual analysis of the serialized assessment in
    /// context retrieved for that exact text.
    pub async fn analyze(&self, input_block: &str) -> Result<Analysis> {
        let sources = self
            .retriever
            .similar(input_block, self.top_k)
            .await
            .map_err(|e| FrailcareError::Retrieval {
                message: e.to_string(),
            })?;

        let context = join_context(&sources);
        let prompt = prompts::analysis_prompt(input_block, &context);
        let text = self
            .chat
            .complete(&prompt)
            .await
            .map_err(|e| FrailcareError::Completion {
                message: e.to_string(),
            })?;

        info!(
            "Analysis stage complete ({} documents retrieved)",
            sources.len()
        );
        Ok(Analysis { text, sources })
    }

    /// Stage 2: synthesize the caretaker-facing plan. The stage-1 analysis
    /// goes into the prompt verbatim.
    pub async fn synthesize(&self, input_block: &str, analysis: &Analysis) -> Result<String> {
        let prompt = prompts::care_plan_prompt(input_block, &analysis.text);
        let plan = self
            .chat
            .complete(&prompt)
            .await
            .map_err(|e| FrailcareError::Completion {
                message: e.to_string(),
            })?;

        info!("Care-plan synthesis complete");
        Ok(plan)
    }

    /// Run both stages, persist the artifact under the caller's uid and
    /// return the artifact text. Nothing is written if an earlier step fails.
    pub async fn generate(&self, assessment: &FrailtyAssessment) -> Result<String> {
        let input_block = assessment.prompt_block();
        let analysis = self.analyze(&input_block).await?;
        let plan = self.synthesize(&input_block, &analysis).await?;
        let artifact = render_artifact(&plan, &analysis.sources);

        plans::write_plan(&self.plan_dir, &assessment.uid, &artifact).map_err(|e| {
            FrailcareError::PlanStore {
                message: e.to_string(),
            }
        })?;

        info!("Care plan written for uid={}", assessment.uid);
        Ok(artifact)
    }
}

/// Join retrieved passages for the analysis prompt; passages without text
/// contribute nothing.
fn join_context(docs: &[RetrievedDocument]) -> String {
    docs.iter()
        .filter_map(|d| d.text.as_deref())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render the final artifact: plan text followed by the citation list.
pub fn render_artifact(plan: &str, sources: &[RetrievedDocument]) -> String {
    format!(
        "\nCare Plan:\n{}\n\nSources used:\n{}\n",
        plan,
        render_citations(sources)
    )
}

/// One line per retrieved document, 1-indexed, "Unknown" when the source
/// metadata is absent.
pub fn render_citations(sources: &[RetrievedDocument]) -> String {
    sources
        .iter()
        .enumerate()
        .map(|(i, doc)| format!("{}. {}", i + 1, doc.source.as_deref().unwrap_or("Unknown")))
        .collect::<Vec<_>>()
        .join("\n")
}
