//! End-to-end pipeline scenarios: fetch → enrich → persist → query.

use std::sync::Arc;

use ingestion::testing::{MockSearchClient, MockSummaryModel};
use ingestion::{
    InsightConfig, MemoryStore, PaperStore, Pipeline, RawPaper, TextInsightExtractor,
};

fn insight_with(model: MockSummaryModel) -> Arc<TextInsightExtractor> {
    Arc::new(TextInsightExtractor::new(
        Arc::new(model),
        InsightConfig::default(),
    ))
}

fn paper(title: &str, abstract_text: &str) -> RawPaper {
    RawPaper::new(
        title,
        abstract_text,
        format!("http://arxiv.org/abs/{}", title.to_lowercase().replace(' ', "-")),
        "2024-01-02T00:00:00Z",
    )
}

#[tokio::test]
async fn fetched_papers_are_enriched_persisted_and_queryable() {
    let papers = vec![
        paper(
            "Attention Is All You Need",
            "The transformer architecture relies entirely on attention mechanisms \
             for sequence transduction, dispensing with recurrence and convolutions.",
        ),
        paper(
            "Deep Residual Learning",
            "Residual networks ease the training of substantially deeper networks \
             by reformulating layers as residual functions.",
        ),
    ];
    let search = Arc::new(MockSearchClient::new().with_results("deep learning", papers));
    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(
        search,
        insight_with(MockSummaryModel::new()),
        store.clone(),
        5,
    );

    let outcome = pipeline.run("deep learning").await.unwrap();

    assert_eq!(outcome.papers.len(), 2);
    assert_eq!(outcome.stored.len(), 2);
    assert!(outcome.is_success());
    for enriched in &outcome.papers {
        assert!(enriched.keywords.len() <= 5);
        assert!(enriched.summary.is_some());
    }

    let records = store.query_by_tag("deep learning", 10).await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.tag == "deep learning"));
}

#[tokio::test]
async fn fetch_timeout_yields_empty_run_and_no_persistence() {
    let search = Arc::new(MockSearchClient::new().failing());
    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(
        search.clone(),
        insight_with(MockSummaryModel::new()),
        store.clone(),
        5,
    );

    let outcome = pipeline.run("quantum computing").await.unwrap();

    assert!(outcome.fetch_failed);
    assert!(outcome.papers.is_empty());
    assert!(outcome.stored.is_empty());
    assert!(store.is_empty());
    assert_eq!(search.call_count(), 1);
}

#[tokio::test]
async fn one_failed_summary_does_not_block_the_other_paper() {
    let failing_abstract = "This abstract reliably breaks the summarizer in tests.";
    let papers = vec![
        paper("Healthy Paper", "Graph neural networks aggregate neighborhood information."),
        paper("Unlucky Paper", failing_abstract),
    ];
    let search = Arc::new(MockSearchClient::new().with_results("graphs", papers));
    let store = Arc::new(MemoryStore::new());
    let model = MockSummaryModel::new().fail_on(failing_abstract);
    let pipeline = Pipeline::new(search, insight_with(model), store.clone(), 5);

    let outcome = pipeline.run("graphs").await.unwrap();

    assert_eq!(outcome.papers.len(), 2);
    assert_eq!(outcome.stored.len(), 2);

    let healthy = &outcome.papers[0];
    let unlucky = &outcome.papers[1];
    assert!(healthy.summary.is_some());
    assert!(unlucky.summary.is_none());
    // Keyword derivation is independent of the summarizer.
    assert!(!unlucky.keywords.is_empty());
}

#[tokio::test]
async fn query_by_tag_is_idempotent_without_writes() {
    let papers = vec![paper("Only Paper", "A short abstract about reinforcement learning.")];
    let search = Arc::new(MockSearchClient::new().with_results("rl", papers));
    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(
        search,
        insight_with(MockSummaryModel::new()),
        store.clone(),
        5,
    );
    pipeline.run("rl").await.unwrap();

    let first = store.query_by_tag("rl", 10).await.unwrap();
    let second = store.query_by_tag("rl", 10).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn max_results_caps_the_batch() {
    let papers: Vec<RawPaper> = (0..8)
        .map(|n| paper(&format!("Paper {n}"), "An abstract about compilers and parsing."))
        .collect();
    let search = Arc::new(MockSearchClient::new().with_results("compilers", papers));
    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(
        search,
        insight_with(MockSummaryModel::new()),
        store,
        3,
    );

    let outcome = pipeline.run("compilers").await.unwrap();
    assert_eq!(outcome.papers.len(), 3);
}
