//! Task Database Library
//!
//! The task database hands out units of work to competing workers in a
//! distributed image-processing backend. It is the binary's (`main.rs`)
//! foundation and can be embedded in tests.
//!
//! ## Modules
//! - **`tasks`**: The task lease manager. An append-only task store, the
//!   fetch-next scanner, the per-claim lease timer and the HTTP handlers.
//! - **`discovery`**: Registration of this service's address in the shared
//!   key-value discovery store.
//! - **`config`**: Command-line configuration.
//! - **`error`**: The error type shared by all of the above.

pub mod config;
pub mod discovery;
pub mod error;
pub mod tasks;
