use crate::api::{
    ApiError, ApplyLeaveRequest, AttendanceRecord, GeoPoint, LeaveRecord, LeaveStatus,
    RegularizationEntry,
};
use crate::pages::dashboard::types::WorkedVerdict;
use crate::utils::time::parse_date_input;
use chrono::{DateTime, Months, NaiveDate, Utc};
use leptos::*;

const HALF_DAY_HOURS: f64 = 4.0;
const FULL_DAY_HOURS: f64 = 8.0;

pub const NOT_CHECKED_IN: &str = "Not checked in yet";

pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}

/// Total hours line: `-` before check-in, `Working...` until check-out.
pub fn worked_duration(record: Option<&AttendanceRecord>) -> String {
    let Some(check_in) = record.and_then(|r| r.check_in) else {
        return "-".into();
    };
    let Some(check_out) = record.and_then(|r| r.check_out) else {
        return "Working...".into();
    };
    let minutes = (check_out - check_in).num_minutes().max(0);
    format!("{} hrs {} mins", minutes / 60, minutes % 60)
}

impl WorkedVerdict {
    pub fn from_hours(hours: f64) -> Self {
        if hours < HALF_DAY_HOURS {
            Self::Absent
        } else if hours < FULL_DAY_HOURS {
            Self::HalfDay
        } else {
            Self::FullDay
        }
    }
}

pub fn checkout_message(hours: f64) -> String {
    let body = match WorkedVerdict::from_hours(hours) {
        WorkedVerdict::Absent => {
            format!("You have completed only {:.2} hrs.\nAbsent will be marked.", hours)
        }
        WorkedVerdict::HalfDay => {
            format!("You completed {:.2} hrs.\nHalf Day will be considered.", hours)
        }
        WorkedVerdict::FullDay => {
            format!("Great! You completed {:.2} hrs.\nFull Day will be considered.", hours)
        }
    };
    format!("{}\n\nDo you want to proceed?", body)
}

/// First non-rejected leave whose range covers `today`.
pub fn leave_covering<'a>(records: &'a [LeaveRecord], today: NaiveDate) -> Option<&'a LeaveRecord> {
    records
        .iter()
        .find(|record| record.status != LeaveStatus::Rejected && record.covers(today))
}

pub fn count_pending_leaves(records: &[LeaveRecord]) -> usize {
    records.iter().filter(|r| r.status.is_pending()).count()
}

pub fn count_pending_regularizations(entries: &[RegularizationEntry]) -> usize {
    entries
        .iter()
        .filter_map(|entry| entry.regularization_request.as_ref())
        .filter_map(|request| request.status.as_deref())
        .filter(|status| status.trim().eq_ignore_ascii_case("pending"))
        .count()
}

pub fn probation_status(doj: Option<NaiveDate>, months: Option<u32>, today: NaiveDate) -> String {
    let (Some(doj), Some(months)) = (doj, months.filter(|m| *m > 0)) else {
        return "N/A".into();
    };
    match doj.checked_add_months(Months::new(months)) {
        Some(end) if today < end => format!("On Probation (Ends {})", end.format("%b %d, %Y")),
        Some(_) => "On Role".into(),
        None => "N/A".into(),
    }
}

pub fn is_wfh(record: &AttendanceRecord) -> bool {
    record
        .mode
        .as_deref()
        .is_some_and(|mode| mode.trim().eq_ignore_ascii_case("WFH"))
}

/// Employee location for WFH check-ins, office location otherwise.
pub fn check_in_location(record: &AttendanceRecord) -> Option<&GeoPoint> {
    if is_wfh(record) {
        record.employee_check_in_location.as_ref()
    } else {
        record.check_in_location.as_ref()
    }
}

pub fn location_label(record: Option<&AttendanceRecord>) -> &'static str {
    match record {
        Some(record) if is_wfh(record) => "WFH Location",
        _ => "Office Location",
    }
}

pub fn location_address(record: Option<&AttendanceRecord>) -> String {
    record
        .filter(|r| r.check_in.is_some())
        .and_then(check_in_location)
        .and_then(|point| point.address.clone())
        .filter(|address| !address.trim().is_empty())
        .unwrap_or_else(|| NOT_CHECKED_IN.to_string())
}

pub fn maps_url(point: &GeoPoint) -> Option<String> {
    match (point.lat, point.lng) {
        (Some(lat), Some(lng)) => Some(format!("https://www.google.com/maps?q={},{}", lat, lng)),
        _ => None,
    }
}

pub const LEAVE_TYPES: [(&str, &str); 2] = [("SL", "Sick Leave"), ("CL", "Casual Leave")];
pub const DURATIONS: [(&str, &str); 2] = [("full", "Full Day"), ("half", "Half Day")];

#[derive(Clone, Copy)]
pub struct QuickLeaveForm {
    leave_type: RwSignal<String>,
    duration: RwSignal<String>,
    date: RwSignal<String>,
}

impl Default for QuickLeaveForm {
    fn default() -> Self {
        Self {
            leave_type: create_rw_signal("SL".to_string()),
            duration: create_rw_signal("full".to_string()),
            date: create_rw_signal(String::new()),
        }
    }
}

impl QuickLeaveForm {
    pub fn leave_type_signal(&self) -> RwSignal<String> {
        self.leave_type
    }

    pub fn duration_signal(&self) -> RwSignal<String> {
        self.duration
    }

    pub fn date_signal(&self) -> RwSignal<String> {
        self.date
    }

    pub fn reset(&self) {
        self.leave_type.set("SL".into());
        self.duration.set("full".into());
        self.date.set(String::new());
    }

    pub fn to_request(&self, employee_id: &str) -> Result<ApplyLeaveRequest, ApiError> {
        let leave_type = self.leave_type.get_untracked().trim().to_string();
        if leave_type.is_empty() {
            return Err(ApiError::validation("Select a leave type."));
        }
        let duration = self.duration.get_untracked().trim().to_ascii_lowercase();
        if !DURATIONS.iter().any(|(value, _)| *value == duration) {
            return Err(ApiError::validation("Select a leave duration."));
        }
        let date = parse_date_input(&self.date.get_untracked())
            .ok_or_else(|| ApiError::validation("Select a leave date."))?;
        Ok(ApplyLeaveRequest {
            employee_id: employee_id.to_string(),
            leave_type,
            duration,
            date,
        })
    }
}
