//! Account and session flows.
//!
//! Holds the bearer token in the key-value store under `token`; everything
//! else that needs to know who is signed in goes through
//! [`AuthService::current_identity`].

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AuthToken, UserIdentity, UserProfile};
use crate::domain::ports::{
    storage_keys, AuthGateway, Credentials, IdentityDecoder, KeyValueStore, Registration,
};

/// Length of the email verification code.
pub const VERIFICATION_CODE_LEN: usize = 6;

/// Shortest accepted password on reset.
pub const MIN_PASSWORD_LEN: usize = 6;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// Loose shape check: something@something.tld
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

fn invalid(message: &str) -> DomainError {
    DomainError::ValidationFailed(message.to_string())
}

pub struct AuthService<S, A, D>
where
    S: KeyValueStore,
    A: AuthGateway,
    D: IdentityDecoder,
{
    store: Arc<S>,
    gateway: Arc<A>,
    decoder: Arc<D>,
}

impl<S, A, D> AuthService<S, A, D>
where
    S: KeyValueStore,
    A: AuthGateway,
    D: IdentityDecoder,
{
    pub const fn new(store: Arc<S>, gateway: Arc<A>, decoder: Arc<D>) -> Self {
        Self {
            store,
            gateway,
            decoder,
        }
    }

    /// Sign in and keep the token.
    ///
    /// The email is trimmed and lowercased before it is sent.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<UserIdentity> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(invalid("Please fill in all fields."));
        }

        let token = self
            .gateway
            .login(&Credentials {
                email,
                password: password.to_string(),
            })
            .await?;
        let identity = self.store_token(token).await?;
        info!(user_id = %identity.user_id, "logged in");
        Ok(identity)
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<UserIdentity> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(invalid("Please fill in all fields."));
        }

        let token = self
            .gateway
            .register(&Registration {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password: password.to_string(),
            })
            .await?;
        let identity = self.store_token(token).await?;
        info!(user_id = %identity.user_id, "registered");
        Ok(identity)
    }

    #[instrument(skip(self, code))]
    pub async fn verify_email(&self, email: &str, code: &str) -> DomainResult<()> {
        let code = code.trim();
        if code.chars().count() != VERIFICATION_CODE_LEN {
            return Err(invalid("Please enter the 6-digit verification code"));
        }
        self.gateway.verify_email(email.trim(), code).await
    }

    /// Send a reset code. Also used to resend one.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(invalid("Please enter your registered email address."));
        }
        if !is_valid_email(email) {
            return Err(invalid("Please enter a valid email address."));
        }
        self.gateway.request_password_reset(email).await
    }

    #[instrument(skip(self, code, new_password, confirmation))]
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
        confirmation: &str,
    ) -> DomainResult<()> {
        validate_reset(code, new_password, confirmation)?;
        self.gateway
            .reset_password(email.trim(), code.trim(), new_password)
            .await
    }

    /// Forget the stored token.
    pub async fn logout(&self) -> DomainResult<()> {
        self.store.remove(storage_keys::TOKEN).await?;
        info!("logged out");
        Ok(())
    }

    pub async fn token(&self) -> DomainResult<AuthToken> {
        self.store
            .get(storage_keys::TOKEN)
            .await?
            .filter(|t| !t.is_empty())
            .map(AuthToken::new)
            .ok_or(DomainError::NotAuthenticated)
    }

    pub async fn current_identity(&self) -> DomainResult<UserIdentity> {
        let token = self.token().await?;
        self.decoder.decode(&token)
    }

    /// Profile of the signed-in user.
    pub async fn profile(&self) -> DomainResult<UserProfile> {
        let token = self.token().await?;
        let identity = self.decoder.decode(&token)?;
        self.gateway.fetch_profile(&token, &identity.user_id).await
    }

    async fn store_token(&self, token: AuthToken) -> DomainResult<UserIdentity> {
        let identity = self.decoder.decode(&token).map_err(|err| {
            warn!(error = %err, "backend issued a token without a usable id");
            err
        })?;
        self.store.set(storage_keys::TOKEN, token.as_str()).await?;
        Ok(identity)
    }
}

fn validate_reset(code: &str, new_password: &str, confirmation: &str) -> DomainResult<()> {
    if code.trim().is_empty() {
        return Err(invalid("Please enter the verification code."));
    }
    if new_password.is_empty() {
        return Err(invalid("Please enter a new password."));
    }
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(invalid("Password must be at least 6 characters long."));
    }
    if new_password != confirmation {
        return Err(invalid("Passwords do not match."));
    }
    Ok(())
}
