//! Full-screen TUI for the Clothe AI wardrobe assistant.

pub mod common;
pub mod effects;
pub mod events;
pub mod navigation;
pub mod render;
pub mod runtime;
pub mod screens;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::{Context, Result};
use clothe_core::backend::{BackendClient, BackendConfig};
use clothe_core::config::Config;
pub use navigation::{NavigationError, Navigator, ViewId};
pub use runtime::TuiRuntime;
pub use state::{AppOptions, AppState};

/// Runs the interactive TUI until the user quits.
///
/// `start_view` overrides the configured start view when set.
///
/// # Errors
/// Returns an error if stderr is not a terminal or the terminal cannot be
/// set up.
pub fn run_interactive(
    config: &Config,
    backend: BackendConfig,
    start_view: Option<&str>,
) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The Clothe TUI requires a terminal.\n\
             Use `clothe ask <endpoint> --text '...'` for non-interactive requests."
        );
    }

    let client = BackendClient::new(backend).context("Failed to create backend client")?;

    let mut options = AppOptions::new(client.base_url());
    options.user_id = config.user_id().map(str::to_string);
    options.start_view = start_view.unwrap_or(&config.start_view).to_string();
    let state = AppState::new(options).context("Failed to compose views")?;

    let mut err = stderr();
    writeln!(err, "Clothe AI")?;
    writeln!(err, "Backend: {}", client.base_url())?;
    err.flush()?;

    tracing::info!(backend = %client.base_url(), view = %state.navigator.active(), "starting tui");

    let mut runtime = TuiRuntime::new(state, client)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
