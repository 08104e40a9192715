//! Persistence collaborator: a single flat table of enriched papers.
//!
//! The core calls storage through one narrow trait; the only invariants
//! are "store what you're given" and "filter by substring".

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{EnrichedPaper, StoredPaper};

/// Default number of records returned by tag lookups.
pub const DEFAULT_QUERY_LIMIT: usize = 10;

/// Flat paper storage keyed by the search tag.
#[async_trait]
pub trait PaperStore: Send + Sync {
    /// Persist an enriched paper under `tag`, assigning a stable
    /// identifier. Duplicate tag/title combinations are stored again,
    /// never rejected.
    async fn save(&self, paper: &EnrichedPaper, tag: &str) -> StoreResult<StoredPaper>;

    /// Return up to `limit` stored papers whose tag contains `tag`
    /// (case-insensitive substring match).
    async fn query_by_tag(&self, tag: &str, limit: usize) -> StoreResult<Vec<StoredPaper>>;
}
