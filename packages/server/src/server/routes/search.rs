use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use ingestion::{EnrichedPaper, Pipeline};

use crate::server::app::AppState;
use crate::server::routes::{bad_request, internal_error, ErrorResponse};

#[derive(Deserialize)]
pub struct SearchParams {
    keyword: String,
    max_results: Option<usize>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    keyword: String,
    count: usize,
    papers: Vec<EnrichedPaper>,
}

/// Trigger one fetch → enrich → persist pass and return the enriched
/// batch.
///
/// Fetch failures degrade to an empty result rather than an error
/// status; `/search` mirrors the scheduled run, which also swallows
/// fetch failures after logging them. Persistence failures surface as
/// a 500 once the whole batch has been attempted.
pub async fn search_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorResponse>)> {
    let keyword = params.keyword.trim().to_string();
    if keyword.is_empty() {
        return Err(bad_request("keyword must not be empty"));
    }
    let max_results = params.max_results.unwrap_or(state.default_max_results);

    let pipeline = Pipeline::new(
        state.search.clone(),
        state.insight.clone(),
        state.store.clone(),
        max_results,
    );
    let outcome = match pipeline.run(&keyword).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(keyword = %keyword, error = %e, "search run failed");
            return Err(internal_error());
        }
    };

    Ok(Json(SearchResponse {
        keyword,
        count: outcome.papers.len(),
        papers: outcome.papers,
    }))
}
