//! Task Lease Manager
//!
//! Hands out units of work to competing workers, guarantees at most one active
//! worker per task, and takes work back from workers that disappear.
//!
//! ## Lifecycle
//! 1. **Create**: a task is appended as `Pending` with id equal to its index.
//! 2. **Fetch**: the scanner claims the lowest `Pending` task reachable from
//!    the cursor and flips it to `InProgress`.
//! 3. **Lease**: the claim arms a one-shot timer. If the task is still
//!    `InProgress` when it fires, the task goes back to `Pending`.
//! 4. **Finish**: the worker moves its task to `Done`. Whichever of finish and
//!    the timer gets the store lock first wins.
//!
//! `overwrite` sits outside this state machine and may set any state directly.
//!
//! ## Submodules
//! - **`store`**: the task sequence, the cursor and the lock discipline.
//! - **`scanner`**: the fetch-next scan.
//! - **`lease`**: the reclaim timer.
//! - **`service`**: the shared service object used by the HTTP layer.
//! - **`handlers`** / **`protocol`**: the HTTP surface.

pub mod handlers;
pub mod lease;
pub mod protocol;
pub mod scanner;
pub mod service;
pub mod store;
pub mod types;
