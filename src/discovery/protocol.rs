//! Discovery Store Protocol
//!
//! The discovery store is a plain key-value service. Registration is a single
//! `POST /set?key=<key>&value=<value>`; any 2xx reply means the value is stored.

/// Endpoint that stores a key-value pair.
pub const ENDPOINT_SET: &str = "/set";

/// Key under which the task database publishes its address.
pub const DATABASE_ADDRESS_KEY: &str = "databaseAddress";
