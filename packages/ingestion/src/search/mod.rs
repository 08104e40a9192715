//! Search client for fetching paper metadata from the arXiv API.

mod atom;

pub use atom::parse_feed;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{FetchError, FetchResult};
use crate::types::{FetchConfig, RawPaper};

/// Client for a paginated paper-search endpoint.
///
/// Implementations perform at most one HTTP attempt per call; retries
/// are the caller's business.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Fetch up to `max_results` papers matching `keyword`.
    ///
    /// An empty or whitespace-only keyword returns an empty vector
    /// without any network I/O.
    async fn fetch(&self, keyword: &str, max_results: usize) -> FetchResult<Vec<RawPaper>>;

    /// Lenient variant preserving the original swallow-to-empty
    /// behavior: failures are logged and become an empty vector, so the
    /// caller cannot distinguish "no results" from "fetch failed".
    async fn fetch_or_empty(&self, keyword: &str, max_results: usize) -> Vec<RawPaper> {
        match self.fetch(keyword, max_results).await {
            Ok(papers) => papers,
            Err(e) => {
                warn!(keyword = %keyword, error = %e, "fetch failed, returning empty");
                Vec::new()
            }
        }
    }
}

/// arXiv search client.
///
/// Issues a single paginated request
/// `{base}?search_query=all:{keyword}&start=0&max_results={n}` with a
/// bounded timeout and parses the Atom response.
pub struct ArxivClient {
    client: reqwest::Client,
    config: FetchConfig,
}

impl Default for ArxivClient {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}

impl ArxivClient {
    /// Create a client with the given fetch configuration.
    ///
    /// The HTTP client and its timeout are fixed here for the object's
    /// lifetime.
    pub fn new(config: FetchConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    fn query_url(&self, keyword: &str, max_results: usize) -> String {
        format!(
            "{}?search_query=all:{}&start=0&max_results={}",
            self.config.base_url,
            urlencoding::encode(keyword),
            max_results
        )
    }
}

#[async_trait]
impl SearchClient for ArxivClient {
    async fn fetch(&self, keyword: &str, max_results: usize) -> FetchResult<Vec<RawPaper>> {
        // Explicit short-circuit, not an error: nothing to search for.
        if keyword.trim().is_empty() {
            debug!("empty keyword, skipping fetch");
            return Ok(Vec::new());
        }

        let url = self.query_url(keyword, max_results);
        debug!(url = %url, "fetching papers");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    keyword: keyword.to_string(),
                }
            } else {
                FetchError::Http(Box::new(e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let mut papers = parse_feed(&body)?;
        papers.truncate(max_results);

        info!(
            keyword = %keyword,
            count = papers.len(),
            "fetched papers from search API"
        );
        Ok(papers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_keyword_short_circuits_without_io() {
        // Local listener counting every connection the client opens.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        let counter = connections.clone();
        tokio::spawn(async move {
            while listener.accept().await.is_ok() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        let client =
            ArxivClient::new(FetchConfig::default().with_base_url(format!("http://{addr}/api/query")));

        let papers = client.fetch("", 5).await.unwrap();
        assert!(papers.is_empty());

        let papers = client.fetch("   ", 5).await.unwrap();
        assert!(papers.is_empty());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(connections.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_query_url_encodes_keyword() {
        let client = ArxivClient::default();
        let url = client.query_url("machine learning", 5);
        assert_eq!(
            url,
            "https://export.arxiv.org/api/query?search_query=all:machine%20learning&start=0&max_results=5"
        );
    }

    #[tokio::test]
    async fn test_fetch_or_empty_swallows_transport_errors() {
        let client = ArxivClient::new(
            FetchConfig::default()
                .with_base_url("http://127.0.0.1:1/api/query")
                .with_timeout(Duration::from_millis(500)),
        );
        let papers = client.fetch_or_empty("electron", 5).await;
        assert!(papers.is_empty());
    }
}
