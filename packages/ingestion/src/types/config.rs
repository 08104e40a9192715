//! Configuration types for fetch and insight operations.

use std::time::Duration;

/// Configuration for the search client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL of the search endpoint
    pub base_url: String,

    /// Bounded request timeout; exceeding it is a retryable-by-caller
    /// failure, not fatal to the process
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://export.arxiv.org/api/query".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl FetchConfig {
    /// Override the search endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Configuration for keyword extraction and summarization.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// Maximum n-gram length for keyword candidates (2 or 3 words)
    pub max_ngram: usize,

    /// Candidates more similar than this to an already-selected keyword
    /// are dropped
    pub dedup_threshold: f64,

    /// Number of keywords to keep, most salient first
    pub top_keywords: usize,

    /// Minimum summary length in output tokens
    pub summary_min_length: usize,

    /// Maximum summary length in output tokens
    pub summary_max_length: usize,

    /// Input-token budget; longer inputs are truncated silently
    pub input_token_budget: usize,

    /// Upper bound on a single summarization call
    pub inference_timeout: Duration,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            max_ngram: 2,
            dedup_threshold: 0.9,
            top_keywords: 5,
            summary_min_length: 30,
            summary_max_length: 150,
            input_token_budget: 1024,
            inference_timeout: Duration::from_secs(60),
        }
    }
}

impl InsightConfig {
    /// Set the maximum n-gram length (clamped to 2..=3).
    pub fn with_max_ngram(mut self, n: usize) -> Self {
        self.max_ngram = n.clamp(2, 3);
        self
    }

    /// Set the summary length bounds.
    pub fn with_summary_bounds(mut self, min_length: usize, max_length: usize) -> Self {
        self.summary_min_length = min_length;
        self.summary_max_length = max_length;
        self
    }

    /// Set the inference timeout.
    pub fn with_inference_timeout(mut self, timeout: Duration) -> Self {
        self.inference_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_ngram_clamped() {
        assert_eq!(InsightConfig::default().with_max_ngram(1).max_ngram, 2);
        assert_eq!(InsightConfig::default().with_max_ngram(3).max_ngram, 3);
        assert_eq!(InsightConfig::default().with_max_ngram(7).max_ngram, 3);
    }
}
