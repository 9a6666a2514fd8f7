//! Report domain models.
//!
//! Reports are owned by the backend and read-only on the client, except for
//! [`NewReport`], the submission form for a fresh report.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identity::UserProfile;

/// Backend-assigned report status.
///
/// Only [`ReportStatus::Resolved`] counts toward badge progress. Statuses the
/// client does not know are preserved verbatim in [`ReportStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReportStatus {
    Pending,
    PendingConfirmation,
    OnGoing,
    Resolved,
    Other(String),
}

impl ReportStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::PendingConfirmation => "Pending Confirmation",
            Self::OnGoing => "On Going",
            Self::Resolved => "Resolved",
            Self::Other(s) => s,
        }
    }

    /// Parse the backend label. Matching is exact; unknown labels are kept.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Pending" => Self::Pending,
            "Pending Confirmation" => Self::PendingConfirmation,
            "On Going" => Self::OnGoing,
            "Resolved" => Self::Resolved,
            other => Self::Other(other.to_string()),
        }
    }

    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReportStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReportStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// Reference to the user who owns a report.
///
/// Depending on whether the backend populated the relation, `user` is either
/// a bare id string or an embedded user object carrying `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportOwner {
    Id(String),
    Embedded {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl ReportOwner {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Embedded { id } => id,
        }
    }
}

/// A waste report as returned by `GET /reports`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub user: Option<ReportOwner>,

    pub status: ReportStatus,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub landmark: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub photo_url: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Report {
    /// Whether this report belongs to `user_id`, in either owner encoding.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user.as_ref().is_some_and(|owner| owner.id() == user_id)
    }
}

/// A device position captured for a new report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
        })
    }
}

/// Country calling code prefixed to contact numbers on submission.
pub const CONTACT_COUNTRY_CODE: &str = "+63";

/// A mobile number in its local 10-digit form (no trunk `0`, no `+63`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactNumber(String);

impl ContactNumber {
    /// Accept user input, keeping digits only. Input longer than ten digits
    /// is truncated the same way the entry field caps it.
    pub fn from_input(input: &str) -> Self {
        Self(input.chars().filter(char::is_ascii_digit).take(10).collect())
    }

    /// Normalize a registered number. Only the `0XXXXXXXXXX` national form is
    /// recognized; anything else leaves the field empty.
    pub fn from_registered(number: &str) -> Option<Self> {
        if number.starts_with('0') && number.len() == 11 && number.chars().all(|c| c.is_ascii_digit()) {
            Some(Self(number[1..].to_string()))
        } else {
            None
        }
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Grouped as `XXX XXX XXXX` for display.
    pub fn display(&self) -> String {
        let d = &self.0;
        match d.len() {
            0..=3 => d.clone(),
            4..=6 => format!("{} {}", &d[..3], &d[3..]),
            _ => format!("{} {} {}", &d[..3], &d[3..6], &d[6..]),
        }
    }

    /// International form sent to the backend.
    pub fn international(&self) -> String {
        format!("{CONTACT_COUNTRY_CODE}{}", self.0)
    }
}

/// Photo attached to a new report, uploaded as `photo.jpg`.
#[derive(Clone, PartialEq, Eq)]
pub struct ReportPhoto {
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ReportPhoto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportPhoto")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Submission form for a new report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewReport {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub contact: ContactNumber,
    pub description: String,
    pub landmark: String,
    /// Geocoded address shown on the dashboard.
    pub location: String,
    /// Location the user registered with, used by the backend for filtering.
    pub user_location: String,
    pub position: Option<GeoPoint>,
    pub photo: Option<ReportPhoto>,
}

impl NewReport {
    /// Start a form pre-filled from the user's registered profile.
    pub fn prefilled(profile: &UserProfile) -> Self {
        Self {
            first_name: profile.first_name.clone().unwrap_or_default(),
            middle_name: profile.middle_initial.clone().unwrap_or_default(),
            last_name: profile.last_name.clone().unwrap_or_default(),
            contact: profile
                .contact_number
                .as_deref()
                .and_then(ContactNumber::from_registered)
                .unwrap_or_default(),
            user_location: profile.location.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Check the form is ready to submit.
    pub fn validate(&self) -> Result<(), String> {
        if self.photo.is_none() || self.position.is_none() {
            return Err("Please take a photo and get your location.".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_known_and_unknown_labels() {
        assert_eq!(ReportStatus::from_label("On Going"), ReportStatus::OnGoing);
        assert_eq!(
            ReportStatus::from_label("Rejected"),
            ReportStatus::Other("Rejected".to_string())
        );
        assert_eq!(ReportStatus::Other("Rejected".into()).as_str(), "Rejected");
        assert!(!ReportStatus::from_label("resolved").is_resolved());
    }

    #[test]
    fn test_report_owner_accepts_both_shapes() {
        let bare: Report = serde_json::from_value(serde_json::json!({
            "_id": "r1", "status": "Resolved", "user": "u1"
        }))
        .unwrap();
        let embedded: Report = serde_json::from_value(serde_json::json!({
            "_id": "r2", "status": "Resolved", "user": {"_id": "u1", "name": "Alex"}
        }))
        .unwrap();

        assert!(bare.is_owned_by("u1"));
        assert!(embedded.is_owned_by("u1"));
        assert!(!embedded.is_owned_by("u2"));
    }

    #[test]
    fn test_report_without_owner_is_owned_by_nobody() {
        let report: Report = serde_json::from_value(serde_json::json!({
            "_id": "r3", "status": "Pending", "user": null
        }))
        .unwrap();
        assert!(!report.is_owned_by(""));
    }

    #[test]
    fn test_contact_number_from_registered() {
        let contact = ContactNumber::from_registered("09171234567").unwrap();
        assert_eq!(contact.digits(), "9171234567");
        assert_eq!(contact.display(), "917 123 4567");
        assert_eq!(contact.international(), "+639171234567");

        assert!(ContactNumber::from_registered("9171234567").is_none());
        assert!(ContactNumber::from_registered("+639171234567").is_none());
    }

    #[test]
    fn test_contact_number_partial_display() {
        assert_eq!(ContactNumber::from_input("91").display(), "91");
        assert_eq!(ContactNumber::from_input("91712").display(), "917 12");
        assert_eq!(
            ContactNumber::from_input("917-123-4567-89").display(),
            "917 123 4567"
        );
    }

    #[test]
    fn test_geo_point_rejects_out_of_range() {
        assert!(GeoPoint::new(14.6, 120.9).is_some());
        assert!(GeoPoint::new(91.0, 0.0).is_none());
        assert!(GeoPoint::new(0.0, f64::NAN).is_none());
    }

    #[test]
    fn test_new_report_requires_photo_and_position() {
        let mut report = NewReport::default();
        assert!(report.validate().is_err());

        report.position = GeoPoint::new(14.6, 120.9);
        assert!(report.validate().is_err());

        report.photo = Some(ReportPhoto { bytes: vec![0xFF, 0xD8] });
        assert!(report.validate().is_ok());
    }

    #[test]
    fn test_prefilled_from_profile() {
        let profile = UserProfile {
            first_name: Some("Alex".into()),
            middle_initial: Some("M".into()),
            last_name: Some("Johnson".into()),
            location: Some("Bulaon".into()),
            contact_number: Some("09171234567".into()),
            email: None,
        };
        let report = NewReport::prefilled(&profile);
        assert_eq!(report.first_name, "Alex");
        assert_eq!(report.middle_name, "M");
        assert_eq!(report.user_location, "Bulaon");
        assert_eq!(report.contact.digits(), "9171234567");
        assert!(report.photo.is_none());
    }
}
