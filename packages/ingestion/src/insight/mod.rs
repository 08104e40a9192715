//! Text insight extraction: keywords and summaries from free text.
//!
//! Two independent derivations over the same input, each failing
//! independently: statistical keyword extraction (no model) and
//! model-backed summarization behind the [`SummaryModel`] trait.

mod extractive;
mod keywords;

#[cfg(feature = "local-model")]
mod model;

pub use extractive::LeadSummarizer;
pub use keywords::KeywordExtractor;

#[cfg(feature = "local-model")]
pub use model::T5Summarizer;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::{InsightError, InsightResult};
use crate::types::InsightConfig;

/// Generation parameters for one summarization call.
#[derive(Debug, Clone)]
pub struct SummaryParams {
    /// Minimum output length in tokens
    pub min_length: usize,

    /// Maximum output length in tokens
    pub max_length: usize,

    /// Inputs longer than this many tokens are truncated silently
    pub input_token_budget: usize,
}

impl SummaryParams {
    fn from_config(config: &InsightConfig) -> Self {
        Self {
            min_length: config.summary_min_length,
            max_length: config.summary_max_length,
            input_token_budget: config.input_token_budget,
        }
    }
}

/// Abstractive (or baseline extractive) summarization backend.
///
/// Implementations load any expensive state once at construction and are
/// safe for concurrent read-only use afterwards.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    /// Produce a summary of `text` bounded by `params`.
    ///
    /// The input is already trimmed and non-empty; implementations own
    /// tokenization and truncation to the input budget.
    async fn summarize(&self, text: &str, params: &SummaryParams) -> InsightResult<String>;

    /// Backend name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Keyword extraction + summarization over raw text.
///
/// Stateless per call. The summary model is long-lived process-wide
/// state, loaded once and shared read-only; pass the extractor by
/// reference (or `Arc`) into the pipeline rather than holding global
/// state.
pub struct TextInsightExtractor {
    keywords: KeywordExtractor,
    model: Arc<dyn SummaryModel>,
    config: InsightConfig,
}

impl TextInsightExtractor {
    /// Create an extractor around an already-constructed summary model.
    pub fn new(model: Arc<dyn SummaryModel>, config: InsightConfig) -> Self {
        Self {
            keywords: KeywordExtractor::new(&config),
            model,
            config,
        }
    }

    /// Extract 0..=5 keywords, most salient first.
    pub fn extract_keywords(&self, text: &str) -> InsightResult<Vec<String>> {
        Ok(self.keywords.extract(text))
    }

    /// Lenient variant: any failure is logged and becomes an empty list.
    pub fn keywords_or_empty(&self, text: &str) -> Vec<String> {
        match self.extract_keywords(text) {
            Ok(keywords) => keywords,
            Err(e) => {
                warn!(error = %e, "keyword extraction failed");
                Vec::new()
            }
        }
    }

    /// Summarize `text` within the configured length bounds.
    ///
    /// Input is trimmed first; empty text yields `Ok(None)` with no
    /// model call. The model call is bounded by the configured inference
    /// timeout so a stuck generation cannot block a pipeline run
    /// indefinitely.
    pub async fn summarize(&self, text: &str) -> InsightResult<Option<String>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let params = SummaryParams::from_config(&self.config);
        let timeout = self.config.inference_timeout;

        let summary = tokio::time::timeout(timeout, self.model.summarize(text, &params))
            .await
            .map_err(|_| InsightError::InferenceTimeout {
                seconds: timeout.as_secs(),
            })??;

        // A blank generation carries no information.
        Ok(Some(summary).filter(|s| !s.trim().is_empty()))
    }

    /// Lenient variant: any failure is logged and becomes `None`.
    pub async fn summary_or_none(&self, text: &str) -> Option<String> {
        match self.summarize(text).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(model = self.model.name(), error = %e, "summarization failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn extractor() -> TextInsightExtractor {
        TextInsightExtractor::new(Arc::new(LeadSummarizer::new()), InsightConfig::default())
    }

    #[tokio::test]
    async fn test_summarize_empty_returns_none() {
        assert!(extractor().summarize("").await.unwrap().is_none());
        assert!(extractor().summarize("   \n").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_summarize_long_text_truncates_not_fails() {
        let text = "A sentence about the experiment. ".repeat(2000);
        let summary = extractor().summarize(&text).await.unwrap();
        let summary = summary.expect("long input should still summarize");
        assert!(summary.split_whitespace().count() <= 150);
    }

    #[tokio::test]
    async fn test_keywords_and_summary_fail_independently() {
        struct FailingModel;

        #[async_trait]
        impl SummaryModel for FailingModel {
            async fn summarize(&self, _: &str, _: &SummaryParams) -> InsightResult<String> {
                Err(InsightError::Model("simulated".to_string().into()))
            }
        }

        let extractor =
            TextInsightExtractor::new(Arc::new(FailingModel), InsightConfig::default());
        let text = "Deep learning models require large datasets for training.";

        assert!(extractor.summary_or_none(text).await.is_none());
        assert!(!extractor.keywords_or_empty(text).is_empty());
    }

    #[tokio::test]
    async fn test_inference_timeout_enforced() {
        struct SlowModel;

        #[async_trait]
        impl SummaryModel for SlowModel {
            async fn summarize(&self, _: &str, _: &SummaryParams) -> InsightResult<String> {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok("too late".to_string())
            }
        }

        let config =
            InsightConfig::default().with_inference_timeout(Duration::from_millis(50));
        let extractor = TextInsightExtractor::new(Arc::new(SlowModel), config);

        let err = extractor.summarize("some abstract").await.unwrap_err();
        assert!(matches!(err, InsightError::InferenceTimeout { .. }));
    }
}
