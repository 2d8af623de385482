use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Lifecycle of the one request a screen may have in flight.
///
/// Mutated only by the reducer. A screen tracks a single active id: starting a
/// new request supersedes the previous one, and completions for any other id
/// are stale.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Marks `id` as the active request before the runtime has spawned it.
    ///
    /// Returns the superseded request's token, if it had already started.
    pub fn begin(&mut self, id: TaskId) -> Option<CancellationToken> {
        let superseded = self.cancel.take();
        self.active = Some(id);
        superseded
    }

    /// Stores the cancel token of a spawned task.
    ///
    /// Returns false when the task was superseded before it started; the caller
    /// must cancel it.
    pub fn on_started(&mut self, started: &TaskStarted) -> bool {
        if self.active != Some(started.id) {
            return false;
        }
        self.cancel.clone_from(&started.cancel);
        true
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
            self.cancel = None;
        }
        ok
    }

    /// Forgets the active request, returning its token so it can be cancelled.
    pub fn clear(&mut self) -> Option<CancellationToken> {
        self.active = None;
        self.cancel.take()
    }
}
