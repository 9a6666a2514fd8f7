//! Identity and profile models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bearer token issued by the backend on login or registration.
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

/// The user a token was issued to, as read from the token payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: String,
}

impl UserIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Registered profile returned by `GET /users/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub middle_initial: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    /// Barangay the user registered under (for example Bulaon or Del Carmen).
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub contact_number: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

impl UserProfile {
    /// Full name with empty parts skipped.
    pub fn display_name(&self) -> String {
        [&self.first_name, &self.middle_initial, &self.last_name]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
