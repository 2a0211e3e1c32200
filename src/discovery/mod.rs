//! Discovery Module
//!
//! Registers the task database in the external key-value discovery store at
//! startup. Nothing else in the service talks to the store afterwards.

pub mod client;
pub mod protocol;
