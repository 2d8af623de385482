//! One-shot request command handler.

use anyhow::{Context, Result};
use clothe_core::backend::{self, BackendClient, BackendConfig, Endpoint};

/// User id sent when neither `--user-id` nor config provides one.
pub const DEFAULT_USER_ID: &str = "user";

/// Sends `text` to `endpoint` and prints the display text.
///
/// Failures are returned as errors carrying the same text the TUI would show.
pub async fn run(
    backend_config: BackendConfig,
    endpoint: Endpoint,
    user_id: &str,
    text: &str,
) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("--text must not be empty");
    }

    let client = BackendClient::new(backend_config).context("create backend client")?;
    tracing::info!(%endpoint, user_id, "ask");

    let result = client.call(endpoint, user_id, text).await;
    let display = backend::display_text(&result, client.base_url());
    match result {
        Ok(_) => {
            println!("{display}");
            Ok(())
        }
        Err(_) => Err(anyhow::anyhow!(display)),
    }
}
