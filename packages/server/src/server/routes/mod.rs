// HTTP routes
pub mod health;
pub mod papers;
pub mod scheduler;
pub mod search;

pub use health::*;
pub use papers::*;
pub use scheduler::*;
pub use search::*;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Generic error body; internal detail stays in the logs.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

pub(crate) fn internal_error() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "internal server error".to_string(),
        }),
    )
}
