//! Data types flowing through the ingestion pipeline.

pub mod config;
pub mod paper;

pub use config::{FetchConfig, InsightConfig};
pub use paper::{EnrichedPaper, RawPaper, StoredPaper};
