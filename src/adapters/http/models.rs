//! Wire types for the backend REST API.

use serde::{Deserialize, Serialize};

use crate::domain::models::{Report, UserProfile};

/// Body of a successful login or registration.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Error body shape shared by the auth endpoints.
///
/// Different backend handlers put the text under `message`, `msg`, or
/// `error`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub requires_verification: Option<bool>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ErrorBody {
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.msg.as_deref())
            .or(self.error.as_deref())
    }
}

/// `GET /reports` returns a bare array on current backends and a `data`
/// envelope on older ones.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReportsPayload {
    List(Vec<Report>),
    Wrapped { data: Vec<Report> },
}

impl ReportsPayload {
    pub fn into_reports(self) -> Vec<Report> {
        match self {
            Self::List(reports) | Self::Wrapped { data: reports } => reports,
        }
    }
}

/// `POST /reports` echoes the stored report, possibly enveloped.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreatedReportPayload {
    Bare(Report),
    Data { data: Report },
    Named { report: Report },
}

impl CreatedReportPayload {
    pub fn into_report(self) -> Report {
        match self {
            Self::Bare(report) | Self::Data { data: report } | Self::Named { report } => report,
        }
    }
}

/// `GET /users/{id}` envelope.
#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub data: Option<UserProfile>,
}

#[derive(Debug, Serialize)]
pub struct VerifyEmailRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest<'a> {
    pub email: &'a str,
    pub reset_code: &'a str,
    pub new_password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_payload_accepts_both_shapes() {
        let bare: ReportsPayload =
            serde_json::from_str(r#"[{"_id":"r1","status":"Pending","user":"u1"}]"#).unwrap();
        let wrapped: ReportsPayload =
            serde_json::from_str(r#"{"data":[{"_id":"r1","status":"Pending","user":"u1"}]}"#)
                .unwrap();
        assert_eq!(bare.into_reports().len(), 1);
        assert_eq!(wrapped.into_reports().len(), 1);
    }

    #[test]
    fn test_error_body_text_precedence() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"msg":"second","error":"third"}"#).unwrap();
        assert_eq!(body.text(), Some("second"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"first","msg":"second"}"#).unwrap();
        assert_eq!(body.text(), Some("first"));

        assert_eq!(ErrorBody::default().text(), None);
    }

    #[test]
    fn test_reset_password_request_field_names() {
        let body = ResetPasswordRequest {
            email: "a@b.co",
            reset_code: "123456",
            new_password: "secret1",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["resetCode"], "123456");
        assert_eq!(json["newPassword"], "secret1");
    }
}
