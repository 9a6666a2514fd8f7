//! Common test utilities for integration tests
//!
//! Provides shared fixtures and fakes used across multiple integration
//! test files.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use ecocheck::domain::models::{AuthToken, NewReport, Report};
use ecocheck::{DomainError, DomainResult, KeyValueStore, ReportGateway};
use serde_json::json;
use tokio::sync::Mutex;

/// Unsigned JWT whose payload carries `id`.
pub fn jwt_for(user_id: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({ "id": user_id, "iat": 1_700_000_000 }).to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

/// Report JSON as the backend sends it, with a bare owner id.
pub fn report_json(id: &str, owner: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "user": owner,
        "status": status,
        "description": "Overflowing bin",
        "landmark": "Beside the chapel",
        "location": "Bulaon, San Fernando",
        "latitude": 15.06,
        "longitude": 120.67,
        "createdAt": "2025-02-01T08:30:00Z"
    })
}

/// Same as [`report_json`] but with the owner embedded as an object.
pub fn report_json_embedded(id: &str, owner: &str, status: &str) -> serde_json::Value {
    let mut value = report_json(id, owner, status);
    value["user"] = json!({ "_id": owner, "firstName": "Ana" });
    value
}

/// `count` resolved reports owned by `owner`.
pub fn resolved_reports(owner: &str, count: usize) -> Vec<Report> {
    (0..count)
        .map(|i| {
            serde_json::from_value(report_json(&format!("r{i}"), owner, "Resolved"))
                .expect("fixture report parses")
        })
        .collect()
}

/// Report gateway serving a replaceable list, counting calls.
pub struct ScriptedGateway {
    reports: Mutex<DomainResult<Vec<Report>>>,
    calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            reports: Mutex::new(Ok(reports)),
            calls: AtomicUsize::new(0),
        }
    }

    pub async fn set_reports(&self, reports: Vec<Report>) {
        *self.reports.lock().await = Ok(reports);
    }

    pub async fn fail_with(&self, err: DomainError) {
        *self.reports.lock().await = Err(err);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReportGateway for ScriptedGateway {
    async fn list_reports(&self, _token: &AuthToken) -> DomainResult<Vec<Report>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.reports.lock().await {
            Ok(reports) => Ok(reports.clone()),
            Err(err) => Err(DomainError::Transport(err.to_string())),
        }
    }

    async fn create_report(&self, _token: &AuthToken, _report: &NewReport) -> DomainResult<Report> {
        Err(DomainError::Transport("not scripted".to_string()))
    }
}

/// Store whose every operation fails.
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> DomainResult<Option<String>> {
        Err(DomainError::StorageError("disk unavailable".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> DomainResult<()> {
        Err(DomainError::StorageError("disk unavailable".to_string()))
    }

    async fn remove(&self, _key: &str) -> DomainResult<()> {
        Err(DomainError::StorageError("disk unavailable".to_string()))
    }
}
