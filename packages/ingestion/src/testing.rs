//! Testing utilities including mock implementations.
//!
//! Useful for testing applications built on the ingestion library
//! without real network calls or model inference.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult, InsightError, InsightResult};
use crate::insight::{SummaryModel, SummaryParams};
use crate::search::SearchClient;
use crate::types::RawPaper;

/// A mock search client returning predefined results per keyword.
///
/// Records every call for assertions, including that no call happened.
#[derive(Default)]
pub struct MockSearchClient {
    results: Arc<RwLock<HashMap<String, Vec<RawPaper>>>>,
    fail_all: bool,
    calls: Arc<RwLock<Vec<MockFetchCall>>>,
}

/// Record of a call made to the mock search client.
#[derive(Debug, Clone)]
pub struct MockFetchCall {
    pub keyword: String,
    pub max_results: usize,
}

impl MockSearchClient {
    /// Create a mock with no predefined results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Predefine results for a keyword.
    pub fn with_results(self, keyword: impl Into<String>, papers: Vec<RawPaper>) -> Self {
        self.results.write().unwrap().insert(keyword.into(), papers);
        self
    }

    /// Make every fetch fail with a simulated timeout.
    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// All calls made to this mock.
    pub fn calls(&self) -> Vec<MockFetchCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of fetch calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn fetch(&self, keyword: &str, max_results: usize) -> FetchResult<Vec<RawPaper>> {
        self.calls.write().unwrap().push(MockFetchCall {
            keyword: keyword.to_string(),
            max_results,
        });

        if self.fail_all {
            return Err(FetchError::Timeout {
                keyword: keyword.to_string(),
            });
        }

        if keyword.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut papers = self
            .results
            .read()
            .unwrap()
            .get(keyword)
            .cloned()
            .unwrap_or_default();
        papers.truncate(max_results);
        Ok(papers)
    }
}

/// A mock summary model with canned or failing responses.
#[derive(Default)]
pub struct MockSummaryModel {
    /// Response returned for any input; `None` means fail the call
    response: Option<String>,

    /// Inputs (by exact text) that should fail even when a response is set
    fail_on: Arc<RwLock<Vec<String>>>,

    calls: Arc<RwLock<Vec<String>>>,
}

impl MockSummaryModel {
    /// Mock that summarizes everything with a canned response.
    pub fn new() -> Self {
        Self {
            response: Some("A concise summary of the abstract.".to_string()),
            ..Self::default()
        }
    }

    /// Override the canned response.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// Mock that fails every summarization call.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Fail only for this exact input text.
    pub fn fail_on(self, text: impl Into<String>) -> Self {
        self.fail_on.write().unwrap().push(text.into());
        self
    }

    /// Inputs this mock was asked to summarize.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl SummaryModel for MockSummaryModel {
    async fn summarize(&self, text: &str, _params: &SummaryParams) -> InsightResult<String> {
        self.calls.write().unwrap().push(text.to_string());

        if self.fail_on.read().unwrap().iter().any(|t| t == text) {
            return Err(InsightError::Model("simulated model failure".into()));
        }
        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err(InsightError::Model("simulated model failure".into())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A well-formed paper for test fixtures.
pub fn sample_paper(n: u32) -> RawPaper {
    RawPaper::new(
        format!("Sample Paper {n}"),
        "We present a method for learning compact representations of scientific text.",
        format!("http://arxiv.org/abs/2401.{n:05}"),
        "2024-01-02T00:00:00Z",
    )
}
