//! Interactive TUI command handler.

use anyhow::{Context, Result};
use clothe_core::backend::BackendConfig;
use clothe_core::config::Config;

pub fn run(config: &Config, backend: BackendConfig, view: Option<&str>) -> Result<()> {
    clothe_tui::run_interactive(config, backend, view).context("interactive session failed")
}
