//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions: they perform I/O and return a result for
//! the runtime to wrap in a `UiEvent`. They never touch `AppState`.

use clothe_core::backend::{BackendClient, Endpoint};
use tokio_util::sync::CancellationToken;

use crate::events::CallResult;

/// Performs one backend call; resolves to `Cancelled` once `cancel` fires.
pub async fn call_backend(
    client: BackendClient,
    endpoint: Endpoint,
    user_id: String,
    text: String,
    cancel: CancellationToken,
) -> CallResult {
    client
        .call_cancellable(endpoint, &user_id, &text, cancel)
        .await
}
