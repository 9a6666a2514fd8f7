//! Infrastructure layer module
//!
//! Cross-cutting concerns that sit outside the domain:
//! - Configuration management (figment, YAML, env overrides)
//! - Logging infrastructure (tracing, rolling files, secret scrubbing)
//! - Bearer token decoding for the current identity

pub mod config;
pub mod identity;
pub mod logging;
