//! Per-device key-value store backed by SQLite. Values are JSON documents so
//! each preference keeps its own shape without schema changes.

mod connection;
mod values;

pub use connection::{ensure_schema, open_in_memory};
pub use values::{delete_value, get_value, put_value};
