//! Task Service
//!
//! The object handed to the HTTP layer. It owns the task store and the lease
//! reclaimer and is created once at startup; handlers and lease timers only
//! ever see it through an `Arc`.

use super::lease::{LEASE_DURATION, LeaseReclaimer};
use super::store::TaskStore;
use super::types::*;
use crate::error::Result;

use std::sync::Arc;
use std::time::Duration;

pub struct TaskService {
    store: Arc<TaskStore>,
    reclaimer: LeaseReclaimer,
}

impl TaskService {
    /// Creates a service with the standard 120 second lease.
    pub fn new() -> Arc<Self> {
        Self::with_lease(LEASE_DURATION)
    }

    pub fn with_lease(lease: Duration) -> Arc<Self> {
        let store = Arc::new(TaskStore::new());
        let reclaimer = LeaseReclaimer::new(store.clone(), lease);
        Arc::new(Self { store, reclaimer })
    }

    pub fn store(&self) -> &Arc<TaskStore> {
        &self.store
    }

    pub fn lease(&self) -> Duration {
        self.reclaimer.lease()
    }

    pub async fn create(&self) -> usize {
        let id = self.store.create().await;
        tracing::info!("Created task {}", id);
        id
    }

    pub async fn get(&self, id: usize) -> Result<Task> {
        self.store.get(id).await
    }

    /// Claims the lowest pending task and starts its lease.
    pub async fn fetch_next(&self) -> Result<Task> {
        let task = self.store.claim_next().await?;
        self.reclaimer.schedule(task.id);

        tracing::info!("Task {} handed out, lease {:?}", task.id, self.lease());
        Ok(task)
    }

    pub async fn finish(&self, id: usize) -> Result<Task> {
        let task = self.store.finish(id).await?;
        tracing::info!("Task {} finished", id);
        Ok(task)
    }

    pub async fn overwrite(&self, id: usize, state: TaskState) -> Result<()> {
        self.store.overwrite(id, state).await?;
        tracing::info!("Task {} overwritten with state {}", id, state);
        Ok(())
    }

    pub async fn enumerate(&self) -> Vec<Task> {
        self.store.enumerate().await
    }
}
