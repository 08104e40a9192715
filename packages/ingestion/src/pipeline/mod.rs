//! Pipeline orchestration: fetch → enrich → persist.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::PipelineError;
use crate::insight::TextInsightExtractor;
use crate::search::SearchClient;
use crate::stores::PaperStore;
use crate::types::{EnrichedPaper, StoredPaper};

/// Result of one successful pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    /// Enriched papers in fetch order, regardless of per-paper
    /// derivation failures
    pub papers: Vec<EnrichedPaper>,

    /// Records the store accepted, in the same order
    pub stored: Vec<StoredPaper>,

    /// True when the fetch stage itself failed, distinguishing "fetch
    /// failed" from "no results"
    pub fetch_failed: bool,
}

impl RunOutcome {
    fn fetch_failure() -> Self {
        Self {
            fetch_failed: true,
            ..Self::default()
        }
    }

    /// True when the fetch stage succeeded.
    pub fn is_success(&self) -> bool {
        !self.fetch_failed
    }
}

/// Fetch → enrich → persist orchestrator.
///
/// Owns no state across calls; the extractor's model weights are the
/// only long-lived state and are shared read-only.
pub struct Pipeline<C, S> {
    search: Arc<C>,
    insight: Arc<TextInsightExtractor>,
    store: Arc<S>,
    max_results: usize,
}

impl<C, S> Pipeline<C, S>
where
    C: SearchClient,
    S: PaperStore,
{
    /// Wire the pipeline to its collaborators.
    pub fn new(
        search: Arc<C>,
        insight: Arc<TextInsightExtractor>,
        store: Arc<S>,
        max_results: usize,
    ) -> Self {
        Self {
            search,
            insight,
            store,
            max_results,
        }
    }

    /// Run one fetch → enrich → persist pass for `keyword`.
    ///
    /// Papers are processed in fetch order. Keyword and summary
    /// derivations fail independently per paper; a save failure for one
    /// paper does not prevent attempting the rest, but once the whole
    /// batch has been attempted any save failure surfaces as
    /// [`PipelineError::Persistence`] so on-demand callers see it. A
    /// fetch failure yields an empty outcome with `fetch_failed` set,
    /// and no persistence calls are made.
    pub async fn run(&self, keyword: &str) -> Result<RunOutcome, PipelineError> {
        let raw = match self.search.fetch(keyword, self.max_results).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(keyword = %keyword, error = %e, "fetch stage failed");
                return Ok(RunOutcome::fetch_failure());
            }
        };

        let mut outcome = RunOutcome::default();
        let mut save_failures = 0usize;
        for paper in raw {
            let keywords = self.insight.keywords_or_empty(&paper.abstract_text);
            let summary = self.insight.summary_or_none(&paper.abstract_text).await;
            let enriched = EnrichedPaper::new(paper, keywords, summary);

            match self.store.save(&enriched, keyword).await {
                Ok(stored) => outcome.stored.push(stored),
                Err(e) => {
                    warn!(
                        keyword = %keyword,
                        title = %enriched.paper.title,
                        error = %e,
                        "failed to save paper"
                    );
                    save_failures += 1;
                }
            }
            outcome.papers.push(enriched);
        }

        if save_failures > 0 {
            return Err(PipelineError::Persistence {
                failed: save_failures,
                total: outcome.papers.len(),
            });
        }

        info!(
            keyword = %keyword,
            fetched = outcome.papers.len(),
            saved = outcome.stored.len(),
            "pipeline run complete"
        );
        Ok(outcome)
    }
}
