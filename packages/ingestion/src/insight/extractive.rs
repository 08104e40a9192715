//! Bounded extractive summarization.
//!
//! Dependency-free [`SummaryModel`] used in development builds and as a
//! baseline: takes leading sentences until the output budget is spent.
//! The abstractive model lives behind the `local-model` feature.

use async_trait::async_trait;

use crate::error::InsightResult;
use crate::insight::{SummaryModel, SummaryParams};

/// Lead-sentence summarizer.
///
/// Deterministic and cheap; output is bounded by the caller's
/// `[min_length, max_length]` word budget.
#[derive(Debug, Clone, Default)]
pub struct LeadSummarizer;

impl LeadSummarizer {
    pub fn new() -> Self {
        Self
    }

    fn summarize_sync(text: &str, params: &SummaryParams) -> String {
        let mut out: Vec<&str> = Vec::new();
        let mut words = 0usize;

        for sentence in text.split_inclusive(['.', '!', '?']) {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }
            let sentence_words = sentence.split_whitespace().count();
            if words >= params.min_length && words + sentence_words > params.max_length {
                break;
            }
            out.push(sentence);
            words += sentence_words;
            if words >= params.max_length {
                break;
            }
        }

        let mut summary = out.join(" ");
        // Hard cap: a single oversized sentence is clipped at the budget.
        let capped: Vec<&str> = summary
            .split_whitespace()
            .take(params.max_length)
            .collect();
        summary = capped.join(" ");
        summary
    }
}

#[async_trait]
impl SummaryModel for LeadSummarizer {
    async fn summarize(&self, text: &str, params: &SummaryParams) -> InsightResult<String> {
        Ok(Self::summarize_sync(text, params))
    }

    fn name(&self) -> &str {
        "lead-sentences"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SummaryParams {
        SummaryParams {
            min_length: 5,
            max_length: 20,
            input_token_budget: 1024,
        }
    }

    #[tokio::test]
    async fn test_respects_max_length() {
        let text = "One two three four five. Six seven eight nine ten. \
                    Eleven twelve thirteen fourteen fifteen. Sixteen seventeen \
                    eighteen nineteen twenty. Twenty-one twenty-two twenty-three.";
        let summary = LeadSummarizer::new().summarize(text, &params()).await.unwrap();
        assert!(summary.split_whitespace().count() <= 20);
        assert!(summary.starts_with("One two three"));
    }

    #[tokio::test]
    async fn test_oversized_single_sentence_is_clipped() {
        let text = "word ".repeat(100);
        let summary = LeadSummarizer::new().summarize(&text, &params()).await.unwrap();
        assert_eq!(summary.split_whitespace().count(), 20);
    }

    #[tokio::test]
    async fn test_short_input_passes_through() {
        let summary = LeadSummarizer::new()
            .summarize("Tiny abstract.", &params())
            .await
            .unwrap();
        assert_eq!(summary, "Tiny abstract.");
    }
}
