//! Typed errors for the ingestion library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. The original behavior of
//! swallowing failures into empty values is preserved by lenient helper
//! methods (`fetch_or_empty`, `keywords_or_empty`, `summary_or_none`)
//! built on top of these types, so callers that need to distinguish
//! "no data" from "error" can.

use thiserror::Error;

/// Errors that can occur while fetching papers from the search API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connection error, DNS, TLS)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request exceeded the fixed timeout
    #[error("timeout fetching results for keyword: {keyword}")]
    Timeout { keyword: String },

    /// Non-2xx response status
    #[error("unexpected status {status} from search API")]
    Status { status: u16 },

    /// Response body was not parsable XML
    #[error("XML parse error: {0}")]
    Xml(String),
}

/// Errors that can occur during keyword extraction or summarization.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Model or tokenizer failed during inference
    #[error("model error: {0}")]
    Model(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Inference exceeded the configured timeout
    #[error("inference timed out after {seconds}s")]
    InferenceTimeout { seconds: u64 },

    /// Model artifact could not be loaded at construction
    #[error("failed to load model artifact {name}: {reason}")]
    ModelLoad { name: String, reason: String },
}

/// Errors from the persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing storage rejected the operation
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors surfaced by `Pipeline::run`.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Fetch stage failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Persistence stage rejected one or more papers; raised after the
    /// whole batch was attempted
    #[error("failed to save {failed} of {total} papers")]
    Persistence { failed: usize, total: usize },
}

/// Errors from the job scheduler.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Underlying cron scheduler failed
    #[error("scheduler error: {0}")]
    Cron(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Trigger could not be constructed (bad cron expression, zero interval)
    #[error("invalid trigger for job {job_id}: {reason}")]
    InvalidTrigger { job_id: String, reason: String },
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for insight operations.
pub type InsightResult<T> = std::result::Result<T, InsightError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
