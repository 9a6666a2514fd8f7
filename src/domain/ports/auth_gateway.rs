use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AuthToken, UserProfile};

/// Login request body
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration request body
#[derive(Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Backend account and session endpoints
///
/// Login failures surface as [`DomainError::LoginRejected`](crate::domain::DomainError::LoginRejected)
/// so callers can route the user (for example to email verification).
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> DomainResult<AuthToken>;

    async fn register(&self, registration: &Registration) -> DomainResult<AuthToken>;

    /// Confirm an email address with the 6-digit code sent to it
    async fn verify_email(&self, email: &str, code: &str) -> DomainResult<()>;

    /// Send (or resend) a password reset code
    async fn request_password_reset(&self, email: &str) -> DomainResult<()>;

    async fn reset_password(&self, email: &str, code: &str, new_password: &str)
        -> DomainResult<()>;

    async fn fetch_profile(&self, token: &AuthToken, user_id: &str) -> DomainResult<UserProfile>;
}
