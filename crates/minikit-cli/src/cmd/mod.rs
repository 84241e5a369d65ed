pub mod config;
pub mod metadata;
pub mod offset;
pub mod serve;
pub mod tx;

use anyhow::Context;
use minikit_core::config::Config;
use std::path::Path;

pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    Config::load_or_default(path).context("failed to load config")
}
