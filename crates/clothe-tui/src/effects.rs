//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! Cancellation is initiated from the reducer via `UiEffect::CancelTask`; the
//! runtime executes it by calling `token.cancel()`.

use clothe_core::backend::Endpoint;
use tokio_util::sync::CancellationToken;

use crate::common::TaskId;
use crate::navigation::ViewId;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// POST `text` to `endpoint` on behalf of `view`.
    CallBackend {
        view: ViewId,
        task: TaskId,
        endpoint: Endpoint,
        user_id: String,
        text: String,
    },

    /// Cancel a request that was superseded or whose screen was closed.
    CancelTask {
        view: ViewId,
        token: Option<CancellationToken>,
    },
}
