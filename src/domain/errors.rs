//! Domain errors for the EcoCheck client.

use thiserror::Error;

/// Why the backend refused a login attempt.
///
/// The backend only returns free-form messages, so the variants are derived
/// from the message text and the `requiresVerification` flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginFailure {
    #[error("Email not verified for {email}")]
    VerificationRequired { email: String },

    #[error("Account has been deactivated")]
    AccountDeactivated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidEmail(String),

    #[error("{0}")]
    InvalidPassword(String),

    #[error("{0}")]
    Other(String),
}

impl LoginFailure {
    /// Classify a rejected login from the backend message and body flags.
    pub fn classify(message: &str, requires_verification: bool, email: Option<&str>) -> Self {
        if let (true, Some(email)) = (requires_verification, email) {
            return Self::VerificationRequired {
                email: email.to_string(),
            };
        }

        let lowered = message.to_lowercase();
        if lowered.contains("deactivated") || lowered.contains("suspended") {
            Self::AccountDeactivated
        } else if lowered.contains("invalid") {
            Self::InvalidCredentials
        } else if lowered.contains("email") {
            Self::InvalidEmail(message.to_string())
        } else if lowered.contains("password") {
            Self::InvalidPassword(message.to_string())
        } else {
            Self::Other(message.to_string())
        }
    }
}

/// Domain-level errors that can occur in the EcoCheck client.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not authenticated: no stored token")]
    NotAuthenticated,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Login rejected: {0}")]
    LoginRejected(LoginFailure),

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        DomainError::Transport(err.to_string())
    }
}
