//! Atom feed parsing for arXiv API responses.
//!
//! The API returns an Atom-namespaced XML document; each `entry` element
//! yields one [`RawPaper`] from its `title`, `summary`, `id` and
//! `published` children. Entries missing any of the four fields are
//! skipped individually so one malformed entry cannot abort the batch.

use serde::Deserialize;
use tracing::warn;

use crate::error::{FetchError, FetchResult};
use crate::types::RawPaper;

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    title: Option<String>,
    summary: Option<String>,
    id: Option<String>,
    published: Option<String>,
}

impl Entry {
    /// Convert one feed entry into a paper, rejecting entries with any
    /// missing or whitespace-only field.
    fn into_paper(self) -> Option<RawPaper> {
        let paper = RawPaper::new(
            self.title?,
            self.summary?,
            self.id?,
            self.published?,
        );
        paper.is_complete().then_some(paper)
    }
}

/// Parse an Atom document into papers.
///
/// A body that is not parsable XML is a [`FetchError::Xml`]. A document
/// with a different root element simply yields no entries. Incomplete
/// entries are logged and skipped; the rest of the document still
/// parses.
pub fn parse_feed(body: &str) -> FetchResult<Vec<RawPaper>> {
    let feed: Feed =
        quick_xml::de::from_str(body).map_err(|e| FetchError::Xml(e.to_string()))?;

    let total = feed.entries.len();
    let papers: Vec<RawPaper> = feed
        .entries
        .into_iter()
        .filter_map(Entry::into_paper)
        .collect();

    if papers.len() < total {
        warn!(
            skipped = total - papers.len(),
            kept = papers.len(),
            "skipped feed entries with missing fields"
        );
    }

    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_TWO_ENTRIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query: search_query=all:electron</title>
  <entry>
    <id>http://arxiv.org/abs/2401.00001v1</id>
    <title>  Electron Dynamics in Strong Fields  </title>
    <summary>We study electron dynamics under strong laser fields.</summary>
    <published>2024-01-02T00:00:00Z</published>
    <author><name>A. Researcher</name></author>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.00002v1</id>
    <title>Quantum Transport Review</title>
    <summary>A review of quantum transport phenomena.</summary>
    <published>2024-01-03T00:00:00Z</published>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_two_entries() {
        let papers = parse_feed(FEED_TWO_ENTRIES).unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[0].title, "Electron Dynamics in Strong Fields");
        assert_eq!(papers[0].link, "http://arxiv.org/abs/2401.00001v1");
        assert_eq!(papers[0].published, "2024-01-02T00:00:00Z");
        assert!(papers.iter().all(RawPaper::is_complete));
    }

    #[test]
    fn test_parse_skips_incomplete_entry() {
        let body = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/abs/2401.00001v1</id>
    <title>Complete Entry</title>
    <summary>Has all fields.</summary>
    <published>2024-01-02T00:00:00Z</published>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.00002v1</id>
    <title>Missing Abstract</title>
    <published>2024-01-03T00:00:00Z</published>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.00003v1</id>
    <title>   </title>
    <summary>Blank title is treated as missing.</summary>
    <published>2024-01-04T00:00:00Z</published>
  </entry>
</feed>"#;

        let papers = parse_feed(body).unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].title, "Complete Entry");
    }

    #[test]
    fn test_parse_rejects_non_xml() {
        assert!(parse_feed("definitely not xml <<<").is_err());
    }

    #[test]
    fn test_parse_wrong_root_yields_empty() {
        let papers = parse_feed("<html><body>error page</body></html>").unwrap();
        assert!(papers.is_empty());
    }

    #[test]
    fn test_parse_empty_feed() {
        let papers =
            parse_feed(r#"<feed xmlns="http://www.w3.org/2005/Atom"></feed>"#).unwrap();
        assert!(papers.is_empty());
    }
}
