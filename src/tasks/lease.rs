//! Lease Reclaimer
//!
//! Every successful `fetch_next` arms a one-shot timer for the claimed task.
//! When the timer fires the task is reverted to `Pending` unless its worker
//! finished it first. Leases are flat and cannot be renewed; a timer is never
//! cancelled, it just becomes a no-op once the task is `Done`.

use super::store::TaskStore;

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long a worker may hold a task before it is handed out again.
pub const LEASE_DURATION: Duration = Duration::from_secs(120);

#[derive(Clone)]
pub struct LeaseReclaimer {
    store: Arc<TaskStore>,
    lease: Duration,
}

impl LeaseReclaimer {
    pub fn new(store: Arc<TaskStore>, lease: Duration) -> Self {
        Self { store, lease }
    }

    pub fn lease(&self) -> Duration {
        self.lease
    }

    /// Spawns the timer for `task_id`.
    ///
    /// The timer sleeps without holding any lock and only takes the cursor and
    /// store locks when it fires. The handle resolves to `true` if the task was
    /// put back to `Pending`.
    pub fn schedule(&self, task_id: usize) -> JoinHandle<bool> {
        let store = self.store.clone();
        let lease = self.lease;

        tokio::spawn(async move {
            tokio::time::sleep(lease).await;

            let reverted = store.revert_if_in_progress(task_id).await;
            if reverted {
                tracing::info!(
                    "Lease on task {} expired after {:?}, task is pending again",
                    task_id,
                    lease
                );
            } else {
                tracing::trace!("Lease on task {} expired, nothing to reclaim", task_id);
            }
            reverted
        })
    }
}
