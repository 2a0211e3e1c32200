//! Lease Scanner
//!
//! Finds the lowest-indexed `Pending` task reachable from the cursor and
//! claims it. The whole scan runs with the cursor lock and the exclusive store
//! lock held, so two concurrent scans can never pick the same task.

use super::store::TaskStore;
use super::types::*;
use crate::error::{DatabaseError, Result};

impl TaskStore {
    /// Claims the next `Pending` task, flipping it to `InProgress`.
    ///
    /// This does not start a lease; `TaskService::fetch_next` does that.
    pub async fn claim_next(&self) -> Result<Task> {
        let mut cursor = self.cursor.lock().await;
        let mut tasks = self.tasks.write().await;

        if tasks.is_empty() {
            return Err(DatabaseError::NoAvailableTask);
        }

        let start = *cursor;
        let claimed = scan(tasks.as_mut_slice(), &mut cursor);

        tracing::trace!(
            "Scan from {} finished, cursor now {}, claimed {:?}",
            start,
            *cursor,
            claimed.map(|task| task.id)
        );

        drop(tasks);
        drop(cursor);
        claimed.ok_or(DatabaseError::NoAvailableTask)
    }
}

/// Walks `tasks` from `cursor` and claims the first `Pending` entry.
///
/// The cursor only moves across a run of `Done` entries starting exactly at
/// its current position. A `Done` entry met after an `InProgress` one does not
/// move it.
pub(super) fn scan(tasks: &mut [Task], cursor: &mut usize) -> Option<Task> {
    let mut index = *cursor;

    while index < tasks.len() {
        match tasks[index].state {
            TaskState::Done if index == *cursor => {
                *cursor += 1;
            }
            TaskState::Pending => {
                tasks[index] = Task {
                    id: index,
                    state: TaskState::InProgress,
                };
                return Some(tasks[index]);
            }
            _ => {}
        }
        index += 1;
    }

    None
}
