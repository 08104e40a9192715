//! In-memory storage implementation for testing and development.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::stores::PaperStore;
use crate::types::{EnrichedPaper, StoredPaper};

/// In-memory paper store.
///
/// Useful for testing and development. Not suitable for production as
/// data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    papers: RwLock<Vec<StoredPaper>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.papers.read().unwrap().len()
    }

    /// True if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all stored records.
    pub fn clear(&self) {
        self.papers.write().unwrap().clear();
    }
}

#[async_trait]
impl PaperStore for MemoryStore {
    async fn save(&self, paper: &EnrichedPaper, tag: &str) -> StoreResult<StoredPaper> {
        let stored = StoredPaper::from_enriched(paper, tag);
        self.papers.write().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn query_by_tag(&self, tag: &str, limit: usize) -> StoreResult<Vec<StoredPaper>> {
        let needle = tag.to_lowercase();
        Ok(self
            .papers
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.tag.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawPaper;

    fn enriched(title: &str) -> EnrichedPaper {
        EnrichedPaper::new(
            RawPaper::new(title, "abstract", "http://arxiv.org/abs/1", "2024-01-01T00:00:00Z"),
            vec!["kw".to_string()],
            Some("summary".to_string()),
        )
    }

    #[tokio::test]
    async fn test_save_and_query() {
        let store = MemoryStore::new();
        store.save(&enriched("A"), "machine learning").await.unwrap();
        store.save(&enriched("B"), "machine learning").await.unwrap();

        let results = store.query_by_tag("machine learning", 10).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_query_substring_case_insensitive() {
        let store = MemoryStore::new();
        store.save(&enriched("A"), "Machine Learning").await.unwrap();

        assert_eq!(store.query_by_tag("machine", 10).await.unwrap().len(), 1);
        assert_eq!(store.query_by_tag("LEARN", 10).await.unwrap().len(), 1);
        assert!(store.query_by_tag("physics", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_respects_limit() {
        let store = MemoryStore::new();
        for _ in 0..15 {
            store.save(&enriched("A"), "ml").await.unwrap();
        }
        assert_eq!(store.query_by_tag("ml", 10).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_query_idempotent_without_writes() {
        let store = MemoryStore::new();
        store.save(&enriched("A"), "ml").await.unwrap();
        store.save(&enriched("B"), "ml").await.unwrap();

        let first = store.query_by_tag("ml", 10).await.unwrap();
        let second = store.query_by_tag("ml", 10).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_duplicate_saves_both_succeed() {
        let store = MemoryStore::new();
        let a = store.save(&enriched("Same Title"), "ml").await.unwrap();
        let b = store.save(&enriched("Same Title"), "ml").await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }
}
