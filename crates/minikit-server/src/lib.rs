pub mod cors;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router for every configured action route.
/// Used by `serve_on()` and available for integration testing.
///
/// Each route serves metadata (GET) and preflight (OPTIONS); routes with
/// `write` enabled also build transactions (POST). Other methods get 405.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new();

    for route in &state.config.routes {
        let mut methods =
            get(routes::metadata::get_metadata).options(routes::preflight::preflight);
        if route.write {
            methods = methods.post(routes::transaction::build_transaction);
        }
        router = router.route(&route.path, methods);
    }

    cors::permissive(router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the action routes on a pre-bound listener.
///
/// Takes a bound `TcpListener` so the caller can read the actual port before
/// starting (useful when `port = 0` and the OS picks a free port).
pub async fn serve_on(state: AppState, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let paths: Vec<&str> = state.config.routes.iter().map(|r| r.path.as_str()).collect();
    tracing::info!(
        port = actual_port,
        network = %state.chain.name,
        routes = ?paths,
        "minikit listening on http://localhost:{actual_port}"
    );

    let app = build_router(state.clone());
    axum::serve(listener, app).await?;
    Ok(())
}
