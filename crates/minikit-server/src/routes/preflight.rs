use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::cors;

/// OPTIONS: unconditional CORS preflight answer.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [(header::ACCESS_CONTROL_ALLOW_HEADERS, cors::ALLOW_HEADERS)],
    )
}
