use crate::output::print_json;
use anyhow::{Context, Result};
use minikit_core::clock::FixedClock;
use minikit_server::AppState;
use std::path::Path;

pub fn run(config_path: Option<&Path>, message: &str, now: Option<u64>, json: bool) -> Result<()> {
    if message.is_empty() {
        anyhow::bail!("message must not be empty");
    }

    let config = super::load_config(config_path)?;
    let mut state = AppState::new(config)?;
    if let Some(t) = now {
        state = state.with_clock(FixedClock(t));
    }

    let response = state
        .execute(message)
        .context("failed to build transaction")?;

    if json {
        print_json(&response)?;
    } else {
        println!("chain: {}", response.chain_id);
        println!("{}", response.serialized_transaction);
    }
    Ok(())
}
