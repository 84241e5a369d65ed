use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use minikit_core::validate::ValidatedMetadata;

use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_HOST: &str = "localhost:3000";
const DEFAULT_PROTO: &str = "http";

/// Public body of a metadata failure. The cause is only logged.
pub const METADATA_ERROR: &str = "Error al crear metadata";

/// Scheme and host the request arrived on, honouring `X-Forwarded-Proto`
/// from a fronting proxy.
pub fn base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_HOST);
    let proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_PROTO);
    format!("{proto}://{host}")
}

/// GET <route>: validated mini-app metadata describing the action.
pub async fn get_metadata(
    State(app): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ValidatedMetadata>, AppError> {
    let base_url = base_url(&headers);
    let validated = app
        .metadata(&base_url)
        .map_err(|e| AppError::internal(METADATA_ERROR, e))?;

    tracing::debug!(base_url = %base_url, "served action metadata");
    Ok(Json(validated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn base_url_defaults() {
        assert_eq!(base_url(&HeaderMap::new()), "http://localhost:3000");
    }

    #[test]
    fn base_url_uses_forwarded_proto_and_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("mini.example"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(base_url(&headers), "https://mini.example");
    }
}
