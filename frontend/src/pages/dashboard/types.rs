use crate::api::{ApiError, AttendanceRecord};
use crate::utils::location::LocationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttendanceError {
    #[error("User ID is missing!")]
    MissingUser,
    #[error("You have applied for leave today. Check-in is not allowed.")]
    OnLeaveToday,
    #[error("Already checked in today at {0}")]
    AlreadyCheckedIn(String),
    #[error("You must check in first")]
    NotCheckedIn,
    #[error("No check-in record found!")]
    NoCheckInRecord,
    #[error("Location data not available!")]
    NoLocationData,
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error("{0}")]
    Request(#[from] ApiError),
}

impl From<AttendanceError> for ApiError {
    fn from(err: AttendanceError) -> Self {
        match err {
            AttendanceError::Request(api) => api,
            other => ApiError::validation(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkedVerdict {
    Absent,
    HalfDay,
    FullDay,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutOutcome {
    CheckedOut(Option<AttendanceRecord>),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingCounts {
    pub leaves: usize,
    pub regularizations: usize,
}
