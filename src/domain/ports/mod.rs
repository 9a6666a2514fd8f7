//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that adapters must implement:
//! - KeyValueStore: local string key-value persistence
//! - ReportGateway: report listing and submission on the backend
//! - AuthGateway: account and session endpoints on the backend
//! - IdentityDecoder: extracting the user id from a bearer token

pub mod auth_gateway;
pub mod identity_decoder;
pub mod key_value_store;
pub mod report_gateway;

pub use auth_gateway::{AuthGateway, Credentials, Registration};
pub use identity_decoder::IdentityDecoder;
pub use key_value_store::{storage_keys, KeyValueStore};
pub use report_gateway::ReportGateway;
