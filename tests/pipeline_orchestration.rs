//! Orchestration-order tests driving the pipeline with stub collaborators

use async_trait::async_trait;
use frailcare::assessment::FrailtyAssessment;
use frailcare::completions::ChatModel;
use frailcare::pipeline::CarePlanPipeline;
use frailcare::plans;
use frailcare::retrieval::{DocumentRetriever, RetrievedDocument};
use std::sync::{Arc, Mutex};

struct StubRetriever {
    calls: Mutex<Vec<(String, usize)>>,
    docs: Vec<RetrievedDocument>,
    fail: bool,
}

impl StubRetriever {
    fn returning(docs: Vec<RetrievedDocument>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            docs,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            docs: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl DocumentRetriever for StubRetriever {
    async fn similar(&self, query: &str, top_k: usize) -> anyhow::Result<Vec<RetrievedDocument>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), top_k));
        if self.fail {
            anyhow::bail!("index unavailable");
        }
        Ok(self.docs.clone())
    }
}

struct StubChat {
    prompts: Mutex<Vec<String>>,
    replies: Mutex<Vec<String>>,
}

impl StubChat {
    fn with_replies(replies: &[&str]) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
        }
    }
}

#[async_trait]
impl ChatModel for StubChat {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            anyhow::bail!("model unavailable");
        }
        Ok(replies.remove(0))
    }
}

fn doc(text: &str, source: Option<&str>) -> RetrievedDocument {
    RetrievedDocument {
        text: Some(text.to_string()),
        source: source.map(str::to_string),
        score: 0.8,
    }
}

fn sample_assessment() -> FrailtyAssessment {
    serde_json::from_str(
        r#"{
            "First Gait Test speed": 0.8,
            "First TUG Test time": 12.5,
            "Gait Speed Test Risk": "High",
            "TUG Test Risk": "Moderate",
            "prisma7": [
                {"question": "Are you older than 85?", "answer": true},
                {"question": "Do you use a cane, walker or wheelchair?", "answer": false}
            ],
            "uid": "abc123"
        }"#,
    )
    .unwrap()
}

#[tokio::test]
async fn retrieval_gets_the_exact_serialized_block_and_k_10() {
    let tmp = tempfile::tempdir().unwrap();
    let assessment = sample_assessment();
    let retriever = Arc::new(StubRetriever::returning(vec![doc("passage", None)]));
    let chat = Arc::new(StubChat::with_replies(&["the analysis", "the plan"]));

    let pipeline = CarePlanPipeline::new(
        retriever.clone(),
        chat,
        10,
        tmp.path().to_path_buf(),
    );
    pipeline.generate(&assessment).await.unwrap();

    let calls = retriever.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, assessment.prompt_block());
    assert_eq!(calls[0].1, 10);
}

#[tokio::test]
async fn stage_two_receives_stage_one_output_verbatim() {
    let tmp = tempfile::tempdir().unwrap();
    let retriever = Arc::new(StubRetriever::returning(vec![doc("passage", None)]));
    let chat = Arc::new(StubChat::with_replies(&[
        "analysis with\nmultiple lines: 0.8 m/s",
        "the plan",
    ]));

    let pipeline = CarePlanPipeline::new(
        retriever,
        chat.clone(),
        10,
        tmp.path().to_path_buf(),
    );
    pipeline.generate(&sample_assessment()).await.unwrap();

    let prompts = chat.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("<analysis>\nanalysis with\nmultiple lines: 0.8 m/s\n</analysis>"));
}

#[tokio::test]
async fn artifact_is_written_under_the_uid_and_returned() {
    let tmp = tempfile::tempdir().unwrap();
    let retriever = Arc::new(StubRetriever::returning(vec![
        doc("a", Some("frailty_guide.pdf")),
        doc("b", None),
        doc("c", Some("tug_reference.pdf")),
    ]));
    let chat = Arc::new(StubChat::with_replies(&["the analysis", "the plan"]));

    let pipeline = CarePlanPipeline::new(retriever, chat, 10, tmp.path().to_path_buf());
    let artifact = pipeline.generate(&sample_assessment()).await.unwrap();

    assert!(artifact.contains("Care Plan:\nthe plan"));
    assert!(artifact.contains("Sources used:\n1. frailty_guide.pdf\n2. Unknown\n3. tug_reference.pdf"));

    let stored = plans::read_plan(tmp.path(), "abc123").unwrap();
    assert_eq!(stored, artifact);
}

#[tokio::test]
async fn rerun_with_same_uid_overwrites_the_prior_plan() {
    let tmp = tempfile::tempdir().unwrap();
    let assessment = sample_assessment();

    let first = CarePlanPipeline::new(
        Arc::new(StubRetriever::returning(vec![])),
        Arc::new(StubChat::with_replies(&["a1", "first plan"])),
        10,
        tmp.path().to_path_buf(),
    );
    first.generate(&assessment).await.unwrap();

    let second = CarePlanPipeline::new(
        Arc::new(StubRetriever::returning(vec![])),
        Arc::new(StubChat::with_replies(&["a2", "second plan"])),
        10,
        tmp.path().to_path_buf(),
    );
    second.generate(&assessment).await.unwrap();

    let stored = plans::read_plan(tmp.path(), "abc123").unwrap();
    assert!(stored.contains("second plan"));
    assert!(!stored.contains("first plan"));
}

#[tokio::test]
async fn retrieval_failure_propagates_and_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let chat = Arc::new(StubChat::with_replies(&["the analysis", "the plan"]));

    let pipeline = CarePlanPipeline::new(
        Arc::new(StubRetriever::failing()),
        chat.clone(),
        10,
        tmp.path().to_path_buf(),
    );
    let result = pipeline.generate(&sample_assessment()).await;

    assert!(result.is_err());
    assert!(chat.prompts.lock().unwrap().is_empty());
    assert!(plans::read_plan(tmp.path(), "abc123").is_err());
}

#[tokio::test]
async fn completion_failure_in_stage_two_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    // Only one reply: the second completion call fails
    let chat = Arc::new(StubChat::with_replies(&["the analysis"]));

    let pipeline = CarePlanPipeline::new(
        Arc::new(StubRetriever::returning(vec![doc("passage", None)])),
        chat,
        10,
        tmp.path().to_path_buf(),
    );
    let result = pipeline.generate(&sample_assessment()).await;

    assert!(result.is_err());
    assert!(plans::read_plan(tmp.path(), "abc123").is_err());
}
