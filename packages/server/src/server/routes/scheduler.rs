use axum::extract::Extension;
use axum::Json;

use ingestion::SchedulerStatus;

use crate::server::app::AppState;

/// Read-only scheduler snapshot: running flag plus each job's id,
/// keyword, trigger, and next fire time.
pub async fn scheduler_status_handler(
    Extension(state): Extension<AppState>,
) -> Json<SchedulerStatus> {
    Json(state.scheduler.status().await)
}
