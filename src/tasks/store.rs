//! Task Store
//!
//! An append-only sequence of tasks addressed by index, plus the scan cursor.
//!
//! ## Locking
//! Two independent guards protect the state:
//! - `tasks`: reader/writer lock over the whole sequence. Shared for reads and
//!   length checks, exclusive for every mutation.
//! - `cursor`: mutex around the scan cursor.
//!
//! Whenever both are needed the cursor is locked first and the store second,
//! and the store guard is dropped before the cursor guard. Every method in this
//! module and in `scanner` follows that order.

use super::types::*;
use crate::error::{DatabaseError, Result};

use tokio::sync::{Mutex, RwLock};

pub struct TaskStore {
    /// Tasks indexed by id. Never shrinks or reorders.
    pub(super) tasks: RwLock<Vec<Task>>,
    /// Index of the oldest task that may still be unfinished.
    /// Everything below it is known to be `Done`.
    pub(super) cursor: Mutex<usize>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(Vec::new()),
            cursor: Mutex::new(0),
        }
    }

    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }

    /// Current cursor position.
    pub async fn cursor(&self) -> usize {
        *self.cursor.lock().await
    }

    pub async fn get(&self, id: usize) -> Result<Task> {
        let tasks = self.tasks.read().await;
        tasks.get(id).copied().ok_or(DatabaseError::NotFound(id))
    }

    /// Appends a new `Pending` task and returns its id.
    pub async fn create(&self) -> usize {
        let mut tasks = self.tasks.write().await;
        let id = tasks.len();
        tasks.push(Task::pending(id));
        id
    }

    /// Administrative override: replaces the task at `id` with `state`,
    /// ignoring the transition rules.
    ///
    /// Moving a task below the cursor out of `Done` pulls the cursor back so
    /// the task stays reachable by the scanner.
    pub async fn overwrite(&self, id: usize, state: TaskState) -> Result<()> {
        let mut cursor = self.cursor.lock().await;
        let mut tasks = self.tasks.write().await;

        if id >= tasks.len() {
            return Err(DatabaseError::InvalidArgument(format!(
                "task id {} out of range (len {})",
                id,
                tasks.len()
            )));
        }

        tasks[id] = Task { id, state };
        if state != TaskState::Done && id < *cursor {
            tracing::debug!("Cursor moved back from {} to {}", *cursor, id);
            *cursor = id;
        }

        drop(tasks);
        drop(cursor);
        Ok(())
    }

    /// Marks an `InProgress` task as `Done`.
    ///
    /// Fails with `Conflict` for any other state: never claimed, already
    /// finished, or already reclaimed by its lease timer.
    pub async fn finish(&self, id: usize) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(id).ok_or(DatabaseError::NotFound(id))?;

        if task.state != TaskState::InProgress {
            return Err(DatabaseError::Conflict {
                id,
                state: task.state,
            });
        }

        task.state = TaskState::Done;
        Ok(*task)
    }

    /// Puts a task back to `Pending` if it is still `InProgress`.
    ///
    /// Returns `true` if the task was reverted. A task that was finished in the
    /// meantime is left untouched.
    pub async fn revert_if_in_progress(&self, id: usize) -> bool {
        let mut cursor = self.cursor.lock().await;
        let mut tasks = self.tasks.write().await;

        let reverted = match tasks.get_mut(id) {
            Some(task) if task.state == TaskState::InProgress => {
                *task = Task::pending(id);
                true
            }
            _ => false,
        };

        if reverted && id < *cursor {
            *cursor = id;
        }

        drop(tasks);
        drop(cursor);
        reverted
    }

    /// Snapshot of every task in id order.
    pub async fn enumerate(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    pub async fn state_counts(&self) -> StateCounts {
        let tasks = self.tasks.read().await;
        let mut counts = StateCounts::default();

        for task in tasks.iter() {
            match task.state {
                TaskState::Pending => counts.pending += 1,
                TaskState::InProgress => counts.in_progress += 1,
                TaskState::Done => counts.done += 1,
            }
        }

        counts
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
