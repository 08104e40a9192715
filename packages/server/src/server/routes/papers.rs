use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use ingestion::{PaperStore, StoredPaper, DEFAULT_QUERY_LIMIT};

use crate::server::app::AppState;
use crate::server::routes::{bad_request, internal_error, ErrorResponse};

#[derive(Deserialize)]
pub struct PapersParams {
    keyword: String,
    limit: Option<usize>,
}

#[derive(Serialize)]
pub struct PapersResponse {
    keyword: String,
    count: usize,
    papers: Vec<StoredPaper>,
}

/// Retrieve previously stored papers by keyword, in insertion order.
pub async fn papers_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<PapersParams>,
) -> Result<Json<PapersResponse>, (StatusCode, Json<ErrorResponse>)> {
    let keyword = params.keyword.trim().to_string();
    if keyword.is_empty() {
        return Err(bad_request("keyword must not be empty"));
    }
    let limit = params.limit.unwrap_or(DEFAULT_QUERY_LIMIT);

    let papers = match state.store.query_by_tag(&keyword, limit).await {
        Ok(papers) => papers,
        Err(e) => {
            tracing::error!(keyword = %keyword, error = %e, "paper query failed");
            return Err(internal_error());
        }
    };

    Ok(Json(PapersResponse {
        keyword,
        count: papers.len(),
        papers,
    }))
}
