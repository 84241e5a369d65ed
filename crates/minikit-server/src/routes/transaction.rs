use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::cors;
use crate::error::{AppError, INTERNAL_ERROR};
use crate::state::AppState;

/// First value of `name` in the query string, if non-empty. Repeated keys
/// resolve to their first occurrence.
fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
}

/// POST <route>?mensaje=...: unsigned transaction storing the message.
///
/// The message is read from the query string under the configured param
/// name. A missing or empty value is a 400. Success and 400 responses carry
/// the narrower write-path `Access-Control-Allow-Headers`.
pub async fn build_transaction(
    State(app): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let allow_headers = [(header::ACCESS_CONTROL_ALLOW_HEADERS, cors::WRITE_ALLOW_HEADERS)];

    let Some(message) = first_param(&params, &app.config.metadata.param.name) else {
        let err = AppError::bad_request("Message parameter is required");
        return Ok((allow_headers, err).into_response());
    };

    let response = app
        .execute(message)
        .map_err(|e| AppError::internal(INTERNAL_ERROR, e))?;

    Ok((allow_headers, Json(response)).into_response())
}
