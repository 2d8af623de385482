//! UI event types.
//!
//! All external inputs (terminal, async results) are converted to `UiEvent`
//! before being processed by the reducer.
//!
//! ## Task Lifecycle Events
//!
//! Backend calls use a uniform lifecycle:
//! - The runtime emits `TaskStarted` once a task is actually spawned
//! - The runtime emits `TaskCompleted` with the call result when done
//! - The reducer is the only place that mutates `TaskState`

use clothe_core::backend::BackendError;
use crossterm::event::Event as CrosstermEvent;

use crate::common::{TaskCompleted, TaskStarted};
use crate::navigation::ViewId;

/// Outcome of one backend call.
pub type CallResult = Result<String, BackendError>;

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation).
    Tick,

    /// Terminal input event (key, paste, resize).
    Terminal(CrosstermEvent),

    /// Runtime spawned a request for `view` (cancel token included).
    TaskStarted { view: ViewId, started: TaskStarted },

    /// A request for `view` finished, was cancelled, or failed.
    TaskCompleted {
        view: ViewId,
        completed: TaskCompleted<CallResult>,
    },
}
