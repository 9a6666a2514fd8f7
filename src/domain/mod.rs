//! Domain layer for the EcoCheck client
//!
//! This module contains the report and badge models, domain errors, and the
//! port traits that adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult, LoginFailure};
