use crate::output::print_json;
use anyhow::{Context, Result};
use minikit_server::AppState;
use std::path::Path;

/// Metadata is a JSON document either way, so there is no plain-text form.
pub fn run(config_path: Option<&Path>, base_url: &str) -> Result<()> {
    let config = super::load_config(config_path)?;
    let state = AppState::new(config)?;
    let metadata = state
        .metadata(base_url)
        .context("failed to create metadata")?;
    print_json(&metadata)
}
