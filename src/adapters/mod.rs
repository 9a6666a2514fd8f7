//! Adapters for external systems: the backend REST API and local storage.

pub mod http;
pub mod memory;
pub mod sqlite;
