use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::utils::time::{parse_flexible_date, parse_flexible_timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    /// Anything the remote system sends that is not one of the known states,
    /// kept lowercase.
    #[default]
    Unknown,
    Other(String),
}

impl LeaveStatus {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "" => Self::Unknown,
            _ => Self::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Unknown => "",
            Self::Other(value) => value,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl From<Option<String>> for LeaveStatus {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for LeaveStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(Self::from)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaveDuration {
    #[default]
    Full,
    Half,
}

impl LeaveDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Half => "half",
        }
    }
}

impl<'de> Deserialize<'de> for LeaveDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref().map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("half") => Self::Half,
            _ => Self::Full,
        })
    }
}

/// A leave as listed by `GET /leave/my/{userId}`. Person references arrive
/// under several keys, as plain ids or populated documents; the first
/// non-empty one wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "wire::RawLeaveRecord")]
pub struct LeaveRecord {
    pub id: String,
    pub leave_type: String,
    pub reason: Option<String>,
    pub duration: LeaveDuration,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub applied_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub status: LeaveStatus,
    pub reporting_manager_id: Option<String>,
    pub approver_id: Option<String>,
    pub rejected_by_id: Option<String>,
}

impl TryFrom<wire::RawLeaveRecord> for LeaveRecord {
    type Error = String;

    fn try_from(raw: wire::RawLeaveRecord) -> Result<Self, Self::Error> {
        let id = wire::first_present([raw.underscore_id, raw.id])
            .ok_or_else(|| "leave record without an id".to_string())?;
        Ok(Self {
            id,
            leave_type: raw.leave_type.unwrap_or_default(),
            reason: raw.reason,
            duration: raw.duration,
            date_from: raw.date_from,
            date_to: raw.date_to,
            applied_at: raw.applied_at,
            created_at: raw.created_at,
            status: raw.status,
            reporting_manager_id: wire::first_present([
                raw.reporting_manager,
                raw.reporting_manager_id,
            ]),
            approver_id: wire::first_present([
                raw.approver,
                raw.approved_by,
                raw.approved_by_id,
                raw.approver_id,
            ]),
            rejected_by_id: wire::first_present([raw.rejected_by, raw.rejected_by_id]),
        })
    }
}

impl LeaveRecord {
    /// `0.5` for half-day leaves, otherwise the inclusive day count. `None`
    /// when a full-day leave lacks either date.
    pub fn day_count(&self) -> Option<f64> {
        match self.duration {
            LeaveDuration::Half => Some(0.5),
            LeaveDuration::Full => {
                let days = (self.date_to? - self.date_from?).num_days() + 1;
                Some(days.max(0) as f64)
            }
        }
    }

    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.applied_at)
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        matches!(
            (self.date_from, self.date_to),
            (Some(from), Some(to)) if from <= date && date <= to
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonResponse {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeoPoint {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, deserialize_with = "wire::optional_timestamp")]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::optional_timestamp")]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub check_in_location: Option<GeoPoint>,
    #[serde(default)]
    pub employee_check_in_location: Option<GeoPoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceEnvelope {
    #[serde(default)]
    pub attendance: Option<AttendanceRecord>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClockRequest {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub mode: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplyLeaveRequest {
    pub employee_id: String,
    pub leave_type: String,
    pub duration: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegularizationEntry {
    #[serde(default)]
    pub regularization_request: Option<RegularizationRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegularizationRequest {
    #[serde(default)]
    pub status: Option<String>,
}

use leptos::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    #[serde(alias = "message")]
    pub error: String,
    #[serde(default)]
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "VALIDATION_ERROR")
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN")
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "REQUEST_FAILED")
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "NOT_FOUND")
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNAUTHORIZED")
    }

    pub fn is_not_found(&self) -> bool {
        self.code == "NOT_FOUND"
    }
}

mod wire {
    use super::*;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RawLeaveRecord {
        #[serde(default, rename = "_id")]
        pub underscore_id: Option<String>,
        #[serde(default)]
        pub id: Option<String>,
        #[serde(default)]
        pub leave_type: Option<String>,
        #[serde(default)]
        pub reason: Option<String>,
        #[serde(default)]
        pub duration: LeaveDuration,
        #[serde(default, deserialize_with = "optional_date")]
        pub date_from: Option<NaiveDate>,
        #[serde(default, deserialize_with = "optional_date")]
        pub date_to: Option<NaiveDate>,
        #[serde(default, deserialize_with = "optional_timestamp")]
        pub applied_at: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "optional_timestamp")]
        pub created_at: Option<DateTime<Utc>>,
        #[serde(default)]
        pub status: LeaveStatus,
        #[serde(default, deserialize_with = "person_ref")]
        pub reporting_manager: Option<String>,
        #[serde(default, deserialize_with = "person_ref")]
        pub reporting_manager_id: Option<String>,
        #[serde(default, deserialize_with = "person_ref")]
        pub approver: Option<String>,
        #[serde(default, deserialize_with = "person_ref")]
        pub approved_by: Option<String>,
        #[serde(default, deserialize_with = "person_ref")]
        pub approved_by_id: Option<String>,
        #[serde(default, deserialize_with = "person_ref")]
        pub approver_id: Option<String>,
        #[serde(default, deserialize_with = "person_ref")]
        pub rejected_by: Option<String>,
        #[serde(default, deserialize_with = "person_ref")]
        pub rejected_by_id: Option<String>,
    }

    pub fn first_present<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
        candidates
            .into_iter()
            .flatten()
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }

    /// Unparsable or missing dates read as `None`.
    pub fn optional_date<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_flexible_date))
    }

    pub fn optional_timestamp<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_flexible_timestamp))
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PersonRef {
        Id(String),
        Populated {
            #[serde(default, rename = "_id")]
            underscore_id: Option<String>,
            #[serde(default)]
            id: Option<String>,
        },
    }

    pub fn person_ref<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let reference = Option::<PersonRef>::deserialize(deserializer)?;
        Ok(reference.and_then(|reference| match reference {
            PersonRef::Id(id) => first_present([Some(id)]),
            PersonRef::Populated { underscore_id, id } => first_present([underscore_id, id]),
        }))
    }
}
