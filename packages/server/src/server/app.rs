//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use ingestion::{
    ArxivClient, FetchConfig, IngestScheduler, InsightConfig, MemoryStore, SummaryModel,
    TextInsightExtractor,
};

use crate::config::Config;
use crate::server::routes::{
    health_handler, papers_handler, scheduler_status_handler, search_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<ArxivClient>,
    pub insight: Arc<TextInsightExtractor>,
    pub store: Arc<MemoryStore>,
    pub scheduler: Arc<IngestScheduler>,
    pub default_max_results: usize,
}

impl AppState {
    /// Wire the ingestion collaborators from configuration.
    pub fn new(config: &Config, model: Arc<dyn SummaryModel>, scheduler: Arc<IngestScheduler>) -> Self {
        let mut fetch_config = FetchConfig::default();
        if let Some(base_url) = &config.arxiv_base_url {
            fetch_config = fetch_config.with_base_url(base_url.clone());
        }

        let insight_config =
            InsightConfig::default().with_inference_timeout(config.inference_timeout);

        Self {
            search: Arc::new(ArxivClient::new(fetch_config)),
            insight: Arc::new(TextInsightExtractor::new(model, insight_config)),
            store: Arc::new(MemoryStore::new()),
            scheduler,
            default_max_results: config.max_results,
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origin: Option<&str>) -> Router {
    let cors = match allowed_origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET])
                .allow_headers([CONTENT_TYPE]),
            Err(_) => {
                tracing::warn!(origin = %origin, "invalid CORS_ORIGIN, allowing any origin");
                CorsLayer::new().allow_origin(Any).allow_methods([Method::GET])
            }
        },
        None => CorsLayer::new().allow_origin(Any).allow_methods([Method::GET]),
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/search", get(search_handler))
        .route("/papers", get(papers_handler))
        .route("/scheduler/status", get(scheduler_status_handler))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
