//! EcoCheck backend HTTP client.
//!
//! Wraps the REST API with typed methods for the report and auth ports.
//! Idempotent reads are retried with exponential backoff on transient
//! failures (network errors, 429, 5xx); writes are sent once.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::models::{
    CreatedReportPayload, ErrorBody, ForgotPasswordRequest, ProfileResponse, ReportsPayload,
    ResetPasswordRequest, TokenResponse, VerifyEmailRequest, VerifyEmailResponse,
};
use crate::domain::errors::{DomainError, DomainResult, LoginFailure};
use crate::domain::models::{ApiConfig, AuthToken, NewReport, Report, UserProfile};
use crate::domain::ports::{AuthGateway, Credentials, Registration, ReportGateway};
use crate::infrastructure::logging::SecretScrubber;

/// Configuration for the backend HTTP client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL including the `/api` prefix
    pub base_url: String,
    pub timeout_secs: u64,
    /// Retries after the first attempt of an idempotent read
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
            initial_backoff_ms: config.initial_backoff_ms,
            max_backoff_ms: config.max_backoff_ms,
        }
    }
}

/// HTTP client for the EcoCheck REST API.
///
/// Non-2xx responses map to [`DomainError::Api`] with the backend's message
/// (secrets scrubbed); network failures map to [`DomainError::Transport`].
#[derive(Debug, Clone)]
pub struct EcoCheckApiClient {
    http: Client,
    base_url: String,
    config: ApiClientConfig,
    scrubber: SecretScrubber,
}

impl EcoCheckApiClient {
    pub fn new(config: ApiClientConfig) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("ecocheck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            config,
            scrubber: SecretScrubber::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a GET, retrying transient failures, and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &AuthToken) -> DomainResult<T> {
        let url = self.url(path);
        let url = url.as_str();
        let attempts = AtomicU32::new(0);
        let attempts = &attempts;
        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(self.config.initial_backoff_ms))
            .with_max_interval(Duration::from_millis(self.config.max_backoff_ms))
            .with_max_elapsed_time(None)
            .build();

        let response = backoff::future::retry(policy, move || async move {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);
            let retries_left = attempt < self.config.max_retries;

            let outcome = match self.http.get(url).bearer_auth(token.as_str()).send().await {
                Ok(resp) if resp.status().is_success() => return Ok(resp),
                Ok(resp) => {
                    let transient = is_transient(resp.status());
                    (self.api_error(resp).await, transient)
                }
                Err(err) => (DomainError::Transport(err.to_string()), true),
            };

            match outcome {
                (err, true) if retries_left => {
                    warn!(url, attempt, error = %err, "transient failure, retrying");
                    Err(backoff::Error::transient(err))
                }
                (err, _) => Err(backoff::Error::permanent(err)),
            }
        })
        .await?;

        decode_json(response).await
    }

    /// Send a one-shot request and return the response if it succeeded.
    async fn send_once(&self, request: RequestBuilder) -> DomainResult<Response> {
        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(self.api_error(response).await)
        }
    }

    /// Turn a failed response into a domain error carrying the backend text.
    async fn api_error(&self, response: Response) -> DomainError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.text().map(str::to_string))
            .unwrap_or(body);
        let message = self.scrubber.scrub_message(&message);

        debug!(status = status.as_u16(), %message, "backend returned error");
        DomainError::Api {
            status: status.as_u16(),
            message: if message.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                message
            },
        }
    }

    async fn post_for_token<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> DomainResult<AuthToken> {
        let response = self.send_once(self.http.post(self.url(path)).json(body)).await?;
        let TokenResponse { token } = decode_json(response).await?;
        Ok(AuthToken::new(token))
    }
}

fn is_transient(status: StatusCode) -> bool {
    status.is_server_error() || status.as_u16() == StatusCode::TOO_MANY_REQUESTS.as_u16()
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> DomainResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(DomainError::from)
}

fn report_form(report: &NewReport) -> DomainResult<Form> {
    let position = report.position.ok_or_else(|| {
        DomainError::ValidationFailed("report has no coordinates".to_string())
    })?;
    let photo = report
        .photo
        .as_ref()
        .ok_or_else(|| DomainError::ValidationFailed("report has no photo".to_string()))?;

    let photo_part = Part::bytes(photo.bytes.clone())
        .file_name("photo.jpg")
        .mime_str("image/jpeg")?;

    Ok(Form::new()
        .text("firstName", report.first_name.clone())
        .text("middleName", report.middle_name.clone())
        .text("lastName", report.last_name.clone())
        .text("contact", report.contact.international())
        .text("description", report.description.clone())
        .text("landmark", report.landmark.clone())
        .text("location", report.location.clone())
        .text("userLocation", report.user_location.clone())
        .text("latitude", position.latitude.to_string())
        .text("longitude", position.longitude.to_string())
        .part("photo", photo_part))
}

#[async_trait]
impl ReportGateway for EcoCheckApiClient {
    #[instrument(skip_all)]
    async fn list_reports(&self, token: &AuthToken) -> DomainResult<Vec<Report>> {
        let payload: ReportsPayload = self.get_json("reports", token).await?;
        let reports = payload.into_reports();
        debug!(count = reports.len(), "fetched reports");
        Ok(reports)
    }

    #[instrument(skip_all)]
    async fn create_report(&self, token: &AuthToken, report: &NewReport) -> DomainResult<Report> {
        let form = report_form(report)?;
        let request = self
            .http
            .post(self.url("reports"))
            .bearer_auth(token.as_str())
            .multipart(form);

        let response = self.send_once(request).await?;
        let payload: CreatedReportPayload = decode_json(response).await?;
        Ok(payload.into_report())
    }
}

#[async_trait]
impl AuthGateway for EcoCheckApiClient {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> DomainResult<AuthToken> {
        let response = self
            .http
            .post(self.url("auth/login"))
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let TokenResponse { token } = decode_json(response).await?;
            return Ok(AuthToken::new(token));
        }
        if !status.is_client_error() {
            return Err(self.api_error(response).await);
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body.text().unwrap_or("An error occurred");
        let failure = LoginFailure::classify(
            message,
            body.requires_verification.unwrap_or(false),
            body.email.as_deref(),
        );
        debug!(status = status.as_u16(), ?failure, "login rejected");
        Err(DomainError::LoginRejected(failure))
    }

    #[instrument(skip_all, fields(email = %registration.email))]
    async fn register(&self, registration: &Registration) -> DomainResult<AuthToken> {
        self.post_for_token("auth/register", registration).await
    }

    #[instrument(skip(self, code))]
    async fn verify_email(&self, email: &str, code: &str) -> DomainResult<()> {
        let request = self
            .http
            .post(self.url("auth/verify-email"))
            .json(&VerifyEmailRequest { email, code });
        let response = self.send_once(request).await?;
        let body: VerifyEmailResponse = decode_json(response).await?;

        if body.success {
            Ok(())
        } else {
            Err(DomainError::ValidationFailed(
                body.message
                    .unwrap_or_else(|| "Verification failed".to_string()),
            ))
        }
    }

    #[instrument(skip(self))]
    async fn request_password_reset(&self, email: &str) -> DomainResult<()> {
        let request = self
            .http
            .post(self.url("auth/forgot-password"))
            .json(&ForgotPasswordRequest { email });
        self.send_once(request).await?;
        Ok(())
    }

    #[instrument(skip(self, code, new_password))]
    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let request = self
            .http
            .post(self.url("auth/reset-password"))
            .json(&ResetPasswordRequest {
                email,
                reset_code: code,
                new_password,
            });
        self.send_once(request).await?;
        Ok(())
    }

    #[instrument(skip(self, token))]
    async fn fetch_profile(&self, token: &AuthToken, user_id: &str) -> DomainResult<UserProfile> {
        let response: ProfileResponse = self.get_json(&format!("users/{user_id}"), token).await?;
        response.data.ok_or_else(|| {
            DomainError::SerializationError("profile response has no data".to_string())
        })
    }
}
