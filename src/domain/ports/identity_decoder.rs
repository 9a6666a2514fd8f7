use crate::domain::errors::DomainResult;
use crate::domain::models::{AuthToken, UserIdentity};

/// Extracts the user identity carried in a bearer token.
///
/// Implementations are not required to verify the token signature; the
/// backend does that on every request.
pub trait IdentityDecoder: Send + Sync {
    fn decode(&self, token: &AuthToken) -> DomainResult<UserIdentity>;
}
