//! Bearer token decoding.

pub mod jwt;

pub use jwt::JwtIdentityDecoder;
