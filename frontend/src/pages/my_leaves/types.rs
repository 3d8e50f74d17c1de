use crate::api::{ApiError, LeaveRecord, LeaveStatus};
use chrono::NaiveDate;
use std::{collections::HashSet, rc::Rc};
use thiserror::Error;

pub const NOT_AVAILABLE: &str = "N/A";

/// A leave record with its person references resolved to display names.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedLeave {
    pub record: LeaveRecord,
    pub reporting_manager_name: String,
    pub approver_name: String,
    pub rejected_by_name: String,
    pub approver_display: String,
}

impl EnrichedLeave {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn status(&self) -> &LeaveStatus {
        &self.record.status
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(LeaveStatus),
}

impl StatusFilter {
    /// Accepts `All`, `pending`, `approved` or `rejected` in any case.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        match LeaveStatus::parse(trimmed) {
            status @ (LeaveStatus::Pending | LeaveStatus::Approved | LeaveStatus::Rejected) => {
                Some(Self::Only(status))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Only(status) => status.as_str(),
        }
    }

    pub fn matches(&self, status: &LeaveStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    TwentyFive,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Five, PageSize::Ten, PageSize::TwentyFive];

    pub fn get(self) -> usize {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::TwentyFive => 25,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(value)
    }
}

/// Read-only view of the list state handed to subscribers after every
/// operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaveListSnapshot {
    pub visible_rows: Vec<Rc<EnrichedLeave>>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Count after filtering.
    pub total_count: usize,
    pub page_size: PageSize,
    pub loaded_count: usize,
    pub criteria: FilterCriteria,
    pub deleting: HashSet<String>,
}

impl LeaveListSnapshot {
    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting.contains(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied(LeaveListSnapshot),
    /// A newer load started before this one finished.
    Superseded,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(LeaveListSnapshot),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LeaveListError {
    #[error("{0}")]
    NetworkFailure(ApiError),
    #[error("Only pending leaves can be deleted (leave {id} is {status})")]
    PreconditionFailed { id: String, status: LeaveStatus },
    #[error("A delete for leave {0} is already in progress")]
    AlreadyInProgress(String),
    #[error("Leave {0} was not found")]
    NotFound(String),
}

impl LeaveListError {
    pub fn from_delete_failure(id: &str, error: ApiError) -> Self {
        if error.is_not_found() {
            Self::NotFound(id.to_string())
        } else {
            Self::NetworkFailure(error)
        }
    }
}

impl From<ApiError> for LeaveListError {
    fn from(error: ApiError) -> Self {
        Self::NetworkFailure(error)
    }
}

impl From<LeaveListError> for ApiError {
    fn from(error: LeaveListError) -> Self {
        let message = error.to_string();
        match error {
            LeaveListError::NetworkFailure(api) => api,
            LeaveListError::NotFound(_) => ApiError::not_found(message),
            _ => ApiError::validation(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_parses_form_values() {
        assert_eq!(StatusFilter::parse("All"), Some(StatusFilter::All));
        assert_eq!(StatusFilter::parse(""), Some(StatusFilter::All));
        assert_eq!(
            StatusFilter::parse("APPROVED"),
            Some(StatusFilter::Only(LeaveStatus::Approved))
        );
        assert_eq!(StatusFilter::parse("cancelled"), None);
        assert!(StatusFilter::Only(LeaveStatus::Pending).matches(&LeaveStatus::Pending));
        assert!(!StatusFilter::Only(LeaveStatus::Pending).matches(&LeaveStatus::Rejected));
    }

    #[test]
    fn page_size_accepts_only_known_sizes() {
        assert_eq!(PageSize::try_from(10), Ok(PageSize::Ten));
        assert_eq!(PageSize::try_from(7), Err(7));
        assert_eq!(PageSize::default().get(), 5);
    }

    #[test]
    fn delete_failure_maps_not_found() {
        let error = LeaveListError::from_delete_failure("l1", ApiError::not_found("gone"));
        assert_eq!(error, LeaveListError::NotFound("l1".into()));
        let error = LeaveListError::from_delete_failure("l1", ApiError::request_failed("down"));
        assert!(matches!(error, LeaveListError::NetworkFailure(_)));
    }

    #[test]
    fn leave_list_error_converts_to_api_error_for_display() {
        let api: ApiError = LeaveListError::PreconditionFailed {
            id: "l1".into(),
            status: LeaveStatus::Approved,
        }
        .into();
        assert_eq!(api.code, "VALIDATION_ERROR");
        assert!(api.error.contains("approved"));
        let api: ApiError = LeaveListError::NetworkFailure(ApiError::unknown("boom")).into();
        assert_eq!(api.error, "boom");
    }
}
