use anyhow::Result;
use minikit_server::AppState;
use std::path::Path;

pub fn run(config_path: Option<&Path>, bind: &str, port: u16) -> Result<()> {
    let config = super::load_config(config_path)?;
    for w in config.validate() {
        tracing::warn!(level = ?w.level, "{}", w.message);
    }
    let state = AppState::new(config)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("{bind}:{port}")).await?;
        let actual_port = listener.local_addr()?.port();

        println!(
            "minikit serving {} on http://localhost:{actual_port}",
            state.chain.name
        );

        tokio::select! {
            res = minikit_server::serve_on(state, listener) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
