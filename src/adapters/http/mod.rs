//! REST adapter for the EcoCheck backend.
//!
//! Implements the [`ReportGateway`](crate::domain::ports::ReportGateway) and
//! [`AuthGateway`](crate::domain::ports::AuthGateway) ports over reqwest.

pub mod client;
pub mod models;

pub use client::{ApiClientConfig, EcoCheckApiClient};
