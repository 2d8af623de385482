mod task;
mod text_field;

pub use task::{TaskCompleted, TaskId, TaskSeq, TaskStarted, TaskState};
pub use text_field::TextField;
