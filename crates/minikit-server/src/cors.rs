use axum::http::{header, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization, X-CSRF-Token, X-Requested-With, \
                                 Accept, Accept-Version, Content-Length, Content-MD5, Date, \
                                 X-Api-Version";
/// Allow-headers sent on transaction responses, narrower than the preflight's.
pub const WRITE_ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Stamp the permissive cross-origin headers on every response, errors and
/// preflights included.
pub fn permissive<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
}
