use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Body of every 500 that does not carry its own public message.
pub const INTERNAL_ERROR: &str = "Internal Server Error";

// ---------------------------------------------------------------------------
// Internal sentinels
// ---------------------------------------------------------------------------

/// Private sentinel carrying an explicit HTTP 400 through the
/// `anyhow::Error` chain. Its message is shown to the caller.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

/// Context attached to an internal failure: the only text the caller sees.
#[derive(Debug)]
struct PublicMessage(&'static str);

impl std::fmt::Display for PublicMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
///
/// Only bad requests echo their message. Everything else becomes a 500 with
/// a fixed message; the underlying chain is logged, never returned.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }

    /// Construct a 500 whose body is `public` regardless of `err`.
    pub fn internal(public: &'static str, err: impl Into<anyhow::Error>) -> Self {
        Self(err.into().context(PublicMessage(public)))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(b) = self.0.downcast_ref::<BadRequestError>() {
            tracing::debug!(reason = %b.0, "rejected request");
            let body = serde_json::json!({ "error": b.0.clone() });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }

        let public = self
            .0
            .downcast_ref::<PublicMessage>()
            .map(|p| p.0)
            .unwrap_or(INTERNAL_ERROR);

        tracing::error!(error = %format!("{:#}", self.0), "request failed");

        let body = serde_json::json!({ "error": public });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
