//! Paper records: raw crawler output, enriched pipeline output, and the
//! stored form assigned by the persistence collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A paper as parsed from one Atom feed entry.
///
/// Ephemeral: lives for a single pipeline pass. All four fields are
/// non-empty after a successful parse; entries with missing or blank
/// fields are rejected by the feed parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPaper {
    /// Paper title, whitespace-trimmed
    pub title: String,

    /// Abstract text, whitespace-trimmed
    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Stable external URI (the Atom `id`), used as a natural identifier
    /// though not enforced unique
    pub link: String,

    /// ISO-8601 publication timestamp as supplied by the feed,
    /// e.g. `2024-03-01T12:00:00Z`
    pub published: String,
}

impl RawPaper {
    /// Create a raw paper, trimming all fields.
    pub fn new(
        title: impl Into<String>,
        abstract_text: impl Into<String>,
        link: impl Into<String>,
        published: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into().trim().to_string(),
            abstract_text: abstract_text.into().trim().to_string(),
            link: link.into().trim().to_string(),
            published: published.into().trim().to_string(),
        }
    }

    /// True if every required field is non-empty.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty()
            && !self.abstract_text.is_empty()
            && !self.link.is_empty()
            && !self.published.is_empty()
    }

    /// Parse the publication timestamp.
    ///
    /// The feed timestamp may carry a trailing UTC `Z` marker; RFC 3339
    /// parsing normalizes it. Returns `None` for unparsable values.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.published.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// A raw paper plus derived insight fields.
///
/// Constructed once per `RawPaper` per pipeline pass and handed straight
/// to persistence; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedPaper {
    /// The fetched paper
    #[serde(flatten)]
    pub paper: RawPaper,

    /// 0..=5 derived keywords, most salient first
    pub keywords: Vec<String>,

    /// Derived summary; `None` signals summarization failure or empty
    /// input, never an empty string
    pub summary: Option<String>,
}

impl EnrichedPaper {
    /// Attach derived fields to a fetched paper.
    pub fn new(paper: RawPaper, keywords: Vec<String>, summary: Option<String>) -> Self {
        // An empty summary string carries no information; normalize to None.
        let summary = summary.filter(|s| !s.trim().is_empty());
        Self {
            paper,
            keywords,
            summary,
        }
    }
}

/// A persisted paper record with its store-assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPaper {
    /// Store-assigned identifier
    pub id: Uuid,

    pub title: String,

    #[serde(rename = "abstract")]
    pub abstract_text: String,

    pub link: String,

    pub published: String,

    pub keywords: Vec<String>,

    pub summary: Option<String>,

    /// The search keyword this record was fetched under
    pub tag: String,

    /// When the record was saved
    pub created_at: DateTime<Utc>,
}

impl StoredPaper {
    /// Build a stored record from an enriched paper, assigning a fresh id.
    pub fn from_enriched(paper: &EnrichedPaper, tag: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: paper.paper.title.clone(),
            abstract_text: paper.paper.abstract_text.clone(),
            link: paper.paper.link.clone(),
            published: paper.paper.published.clone(),
            keywords: paper.keywords.clone(),
            summary: paper.summary.clone(),
            tag: tag.into(),
            created_at: Utc::now(),
        }
    }
}
