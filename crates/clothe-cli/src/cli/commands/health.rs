//! Backend health check handler.

use anyhow::{Context, Result};
use clothe_core::backend::{self, BackendClient, BackendConfig};

pub async fn run(backend_config: BackendConfig) -> Result<()> {
    let client = BackendClient::new(backend_config).context("create backend client")?;
    let result = client.health().await;
    match result {
        Ok(message) => {
            println!("{} is up: {message}", client.base_url());
            Ok(())
        }
        Err(_) => Err(anyhow::anyhow!(backend::display_text(
            &result,
            client.base_url()
        ))),
    }
}
