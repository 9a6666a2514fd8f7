//! Reads the user id out of a JWT payload.
//!
//! The signature is not verified: the backend is the only party that
//! trusts the token, the client just needs to know whose reports to count.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AuthToken, UserIdentity};
use crate::domain::ports::IdentityDecoder;

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    id: Option<Value>,
}

/// [`IdentityDecoder`] for the backend's HS256 tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtIdentityDecoder;

impl JwtIdentityDecoder {
    pub const fn new() -> Self {
        Self
    }
}

impl IdentityDecoder for JwtIdentityDecoder {
    fn decode(&self, token: &AuthToken) -> DomainResult<UserIdentity> {
        let mut segments = token.as_str().split('.');
        let payload = match (segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_)) if segments.next().is_none() => payload,
            _ => {
                return Err(DomainError::InvalidToken(
                    "expected three dot-separated segments".to_string(),
                ))
            }
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| DomainError::InvalidToken(format!("payload is not base64url: {e}")))?;
        let claims: Claims = serde_json::from_slice(&bytes)
            .map_err(|e| DomainError::InvalidToken(format!("payload is not JSON: {e}")))?;

        let user_id = match claims.id {
            Some(Value::String(id)) if !id.is_empty() => id,
            Some(Value::Number(id)) => id.to_string(),
            _ => return Err(DomainError::InvalidToken("payload has no id".to_string())),
        };

        Ok(UserIdentity::new(user_id))
    }
}
