use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DatabaseError;

/// Lifecycle state of a task.
///
/// On the wire the state is a bare integer: `0` Pending, `1` InProgress, `2` Done.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "u8", try_from = "i64")]
pub enum TaskState {
    /// Created and waiting for a worker.
    Pending,
    /// Handed out by `fetch_next` and covered by a lease.
    InProgress,
    /// Finished by its worker. Terminal for the regular transitions.
    Done,
}

impl TaskState {
    pub fn code(self) -> u8 {
        match self {
            TaskState::Pending => 0,
            TaskState::InProgress => 1,
            TaskState::Done => 2,
        }
    }
}

impl From<TaskState> for u8 {
    fn from(state: TaskState) -> Self {
        state.code()
    }
}

impl TryFrom<i64> for TaskState {
    type Error = DatabaseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskState::Pending),
            1 => Ok(TaskState::InProgress),
            2 => Ok(TaskState::Done),
            other => Err(DatabaseError::InvalidArgument(format!(
                "invalid task state {}",
                other
            ))),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Pending => write!(f, "Pending"),
            TaskState::InProgress => write!(f, "InProgress"),
            TaskState::Done => write!(f, "Done"),
        }
    }
}

/// One unit of work.
///
/// `id` always equals the task's index in the store and never changes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: usize,
    pub state: TaskState,
}

impl Task {
    pub fn pending(id: usize) -> Self {
        Self {
            id,
            state: TaskState::Pending,
        }
    }
}

/// Number of tasks in each state, used for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub done: usize,
}
