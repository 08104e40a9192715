//! Research-Paper Ingestion Library
//!
//! Periodically and on demand fetches paper metadata from the arXiv
//! search API, derives keywords and a bounded summary from each
//! abstract, and persists results for keyword-based retrieval.
//!
//! # Design
//!
//! - Fetch, derivation and persistence failures are isolated: one bad
//!   entry, one failed summary or one rejected save never aborts the
//!   rest of a batch. Save failures surface only after every paper in
//!   the batch has been attempted.
//! - Strict `Result` APIs with lenient `*_or_empty` / `*_or_none`
//!   helpers, so callers can distinguish "no data" from "error" while
//!   the pipeline keeps the original degrade-to-empty behavior.
//! - Expensive model state is loaded once, owned explicitly, and shared
//!   read-only behind the [`insight::SummaryModel`] trait.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ingestion::{
//!     ArxivClient, FetchConfig, InsightConfig, LeadSummarizer, MemoryStore,
//!     Pipeline, TextInsightExtractor,
//! };
//!
//! let search = Arc::new(ArxivClient::new(FetchConfig::default()));
//! let insight = Arc::new(TextInsightExtractor::new(
//!     Arc::new(LeadSummarizer::new()),
//!     InsightConfig::default(),
//! ));
//! let store = Arc::new(MemoryStore::new());
//!
//! let pipeline = Pipeline::new(search, insight, store, 5);
//! let outcome = pipeline.run("machine learning").await?;
//! ```
//!
//! # Modules
//!
//! - [`search`] - arXiv search client and Atom feed parsing
//! - [`insight`] - keyword extraction and summarization
//! - [`pipeline`] - fetch → enrich → persist orchestration
//! - [`scheduler`] - recurring pipeline runs with job identity
//! - [`stores`] - persistence collaborator trait and in-memory store
//! - [`testing`] - mock implementations for testing

pub mod error;
pub mod insight;
pub mod pipeline;
pub mod scheduler;
pub mod search;
pub mod stores;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use error::{FetchError, InsightError, PipelineError, SchedulerError, StoreError};
pub use insight::{KeywordExtractor, LeadSummarizer, SummaryModel, TextInsightExtractor};
pub use pipeline::{Pipeline, RunOutcome};
pub use scheduler::{
    IngestScheduler, JobSpec, JobStatus, SchedulerStatus, Trigger, DAILY_FETCH_JOB_ID,
};
pub use search::{ArxivClient, SearchClient};
pub use stores::{MemoryStore, PaperStore, DEFAULT_QUERY_LIMIT};
pub use types::{EnrichedPaper, FetchConfig, InsightConfig, RawPaper, StoredPaper};

#[cfg(feature = "local-model")]
pub use insight::T5Summarizer;
