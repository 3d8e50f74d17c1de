use crate::api::{ApiError, LeaveStatus};
use crate::utils::time::{format_display_date, parse_date_input};
use chrono::NaiveDate;
use leptos::*;
use std::rc::Rc;

use super::types::{EnrichedLeave, FilterCriteria, PageSize, StatusFilter, NOT_AVAILABLE};

fn resolved(name: &str) -> Option<&str> {
    (name != NOT_AVAILABLE && !name.trim().is_empty()).then_some(name)
}

/// Picks the name shown in the "Approved By" column.
pub fn approver_display(
    status: &LeaveStatus,
    manager: &str,
    approver: &str,
    rejected_by: &str,
) -> String {
    let chosen = match status {
        LeaveStatus::Pending => resolved(manager),
        LeaveStatus::Approved => resolved(approver).or_else(|| resolved(manager)),
        LeaveStatus::Rejected => resolved(rejected_by)
            .or_else(|| resolved(approver))
            .or_else(|| resolved(manager)),
        LeaveStatus::Other(_) | LeaveStatus::Unknown => {
            resolved(approver).or_else(|| resolved(manager))
        }
    };
    chosen.unwrap_or(NOT_AVAILABLE).to_string()
}

pub fn filter_leaves(
    leaves: &[Rc<EnrichedLeave>],
    criteria: &FilterCriteria,
) -> Vec<Rc<EnrichedLeave>> {
    leaves
        .iter()
        .filter(|leave| {
            let record = &leave.record;
            criteria.status.matches(&record.status)
                && criteria
                    .date_from
                    .map_or(true, |from| record.date_from.is_some_and(|date| date >= from))
                && criteria
                    .date_to
                    .map_or(true, |to| record.date_to.is_some_and(|date| date <= to))
        })
        .cloned()
        .collect()
}

pub fn total_pages(len: usize, page_size: PageSize) -> usize {
    len.div_ceil(page_size.get())
}

pub fn page_slice<T: Clone>(data: &[T], current_page: usize, page_size: PageSize) -> Vec<T> {
    let size = page_size.get();
    let start = current_page.saturating_sub(1).saturating_mul(size);
    if start >= data.len() {
        return Vec::new();
    }
    let end = (start + size).min(data.len());
    data[start..end].to_vec()
}

/// Current page and page size. `current_page` is 1-based and kept within
/// `1..=max(total_pages, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub current_page: usize,
    pub page_size: PageSize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: PageSize::default(),
        }
    }
}

impl Pager {
    /// Moves to `page` when it exists; returns whether the page changed.
    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        let pages = total_pages(len, self.page_size);
        if page < 1 || page > pages || page == self.current_page {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next(&mut self, len: usize) -> bool {
        self.go_to(self.current_page + 1, len)
    }

    pub fn previous(&mut self, len: usize) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.go_to(page, len),
            None => false,
        }
    }

    pub fn clamp(&mut self, len: usize) {
        let last = total_pages(len, self.page_size).max(1);
        self.current_page = self.current_page.clamp(1, last);
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    pub fn reset_page(&mut self) {
        self.current_page = 1;
    }
}

pub fn range_label(current_page: usize, page_size: PageSize, count: usize) -> String {
    if count == 0 {
        return "0–0 of 0".to_string();
    }
    let first = current_page.saturating_sub(1) * page_size.get() + 1;
    let last = (current_page * page_size.get()).min(count);
    format!("{}-{} of {}", first, last, count)
}

pub fn format_day_count(days: f64) -> String {
    if days.fract() == 0.0 {
        format!("{}", days as i64)
    } else {
        format!("{}", days)
    }
}

pub fn display_day_count(days: Option<f64>) -> String {
    days.map(format_day_count).unwrap_or_else(|| "-".into())
}

pub fn display_date(date: Option<NaiveDate>) -> String {
    date.map(format_display_date).unwrap_or_else(|| "-".into())
}

/// Text inputs backing the filter bar.
#[derive(Clone, Copy)]
pub struct FilterFormState {
    status: RwSignal<String>,
    date_from: RwSignal<String>,
    date_to: RwSignal<String>,
}

impl Default for FilterFormState {
    fn default() -> Self {
        Self {
            status: create_rw_signal("All".to_string()),
            date_from: create_rw_signal(String::new()),
            date_to: create_rw_signal(String::new()),
        }
    }
}

impl FilterFormState {
    pub fn status_signal(&self) -> RwSignal<String> {
        self.status
    }

    pub fn date_from_signal(&self) -> RwSignal<String> {
        self.date_from
    }

    pub fn date_to_signal(&self) -> RwSignal<String> {
        self.date_to
    }

    pub fn reset(&self) {
        self.status.set("All".into());
        self.date_from.set(String::new());
        self.date_to.set(String::new());
    }

    pub fn to_criteria(&self) -> Result<FilterCriteria, ApiError> {
        let status = StatusFilter::parse(&self.status.get_untracked())
            .ok_or_else(|| ApiError::validation("Unknown status filter."))?;
        let date_from = optional_date(
            &self.date_from.get_untracked(),
            "From date must be in YYYY-MM-DD format.",
        )?;
        let date_to = optional_date(
            &self.date_to.get_untracked(),
            "To date must be in YYYY-MM-DD format.",
        )?;
        Ok(FilterCriteria {
            status,
            date_from,
            date_to,
        })
    }
}

fn optional_date(
    input: &str,
    err: &str,
) -> Result<Option<chrono::NaiveDate>, ApiError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_date_input(input)
        .map(Some)
        .ok_or_else(|| ApiError::validation(err.to_string()))
}

#[derive(Clone, Default)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<ApiError>,
}

impl MessageState {
    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.success = Some(msg.into());
        self.error = None;
    }

    pub fn set_error(&mut self, msg: ApiError) {
        self.error = Some(msg);
        self.success = None;
    }

    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn approver_display_follows_status_rules() {
        use LeaveStatus::*;
        let na = NOT_AVAILABLE;
        let cases: Vec<(LeaveStatus, &str, &str, &str, &str)> = vec![
            (Pending, "Mgr", "Appr", "Rej", "Mgr"),
            (Pending, na, "Appr", "Rej", na),
            (Approved, "Mgr", "Appr", na, "Appr"),
            (Approved, "Mgr", na, "Rej", "Mgr"),
            (Approved, na, na, na, na),
            (Rejected, "Mgr", "Appr", "Rej", "Rej"),
            (Rejected, "Mgr", "Appr", na, "Appr"),
            (Rejected, "Mgr", na, na, "Mgr"),
            (Rejected, na, na, na, na),
            (Other("cancelled".into()), "Mgr", "Appr", "Rej", "Appr"),
            (Other("cancelled".into()), "Mgr", na, "Rej", "Mgr"),
            (Unknown, na, na, "Rej", na),
        ];
        for (status, manager, approver, rejected, expected) in cases {
            assert_eq!(
                approver_display(&status, manager, approver, rejected),
                expected,
                "status {:?}",
                status
            );
        }
    }

    #[test]
    fn filter_by_status_and_start_date_keeps_order() {
        let leaves = vec![
            enriched(record("a", LeaveStatus::Approved, (2023, 12, 30))),
            enriched(record("b", LeaveStatus::Approved, (2024, 2, 1))),
            enriched(record("c", LeaveStatus::Pending, (2024, 3, 1))),
            enriched(record("d", LeaveStatus::Approved, (2024, 1, 1))),
        ];
        let criteria = FilterCriteria {
            status: StatusFilter::Only(LeaveStatus::Approved),
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            date_to: None,
        };
        let ids: Vec<_> = filter_leaves(&leaves, &criteria)
            .iter()
            .map(|leave| leave.id().to_string())
            .collect();
        assert_eq!(ids, vec!["b", "d"]);
    }

    #[test]
    fn records_without_dates_fail_date_bounds_only() {
        let mut undated = record("u", LeaveStatus::Pending, (2024, 5, 1));
        undated.date_from = None;
        undated.date_to = None;
        let leaves = vec![
            enriched(undated),
            enriched(record("d", LeaveStatus::Pending, (2024, 5, 2))),
        ];

        assert_eq!(filter_leaves(&leaves, &FilterCriteria::default()).len(), 2);
        let bounded = FilterCriteria {
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..FilterCriteria::default()
        };
        let ids: Vec<_> = filter_leaves(&leaves, &bounded)
            .iter()
            .map(|leave| leave.id().to_string())
            .collect();
        assert_eq!(ids, vec!["d"]);
        let bounded = FilterCriteria {
            date_to: NaiveDate::from_ymd_opt(2030, 1, 1),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_leaves(&leaves, &bounded).len(), 1);
        assert_eq!(display_date(None), "-");
        assert_eq!(display_day_count(None), "-");
    }

    #[test]
    fn filter_is_idempotent_and_default_keeps_everything() {
        let leaves: Vec<_> = (1..=6)
            .map(|day| {
                let status = if day % 2 == 0 {
                    LeaveStatus::Pending
                } else {
                    LeaveStatus::Rejected
                };
                enriched(record(&format!("l{day}"), status, (2024, 4, day)))
            })
            .collect();
        let criteria = FilterCriteria {
            status: StatusFilter::Only(LeaveStatus::Pending),
            date_from: None,
            date_to: NaiveDate::from_ymd_opt(2024, 4, 4),
        };
        let once = filter_leaves(&leaves, &criteria);
        let twice = filter_leaves(&once, &criteria);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
        assert_eq!(filter_leaves(&leaves, &FilterCriteria::default()), leaves);
    }

    #[test]
    fn pages_concatenate_to_the_data() {
        for len in 0..=30usize {
            let data: Vec<usize> = (0..len).collect();
            for size in PageSize::ALL {
                let pages = total_pages(len, size);
                assert_eq!(pages, (len + size.get() - 1) / size.get());
                let joined: Vec<usize> = (1..=pages)
                    .flat_map(|page| page_slice(&data, page, size))
                    .collect();
                assert_eq!(joined, data);
            }
        }
    }

    #[test]
    fn pager_ignores_out_of_range_navigation() {
        let mut pager = Pager::default();
        assert!(!pager.go_to(4, 12));
        assert!(!pager.go_to(0, 12));
        assert!(pager.go_to(3, 12));
        assert!(!pager.next(12));
        assert!(pager.previous(12));
        assert_eq!(pager.current_page, 2);

        pager.clamp(3);
        assert_eq!(pager.current_page, 1);
        pager.clamp(0);
        assert_eq!(pager.current_page, 1);

        pager.go_to(2, 12);
        pager.set_page_size(PageSize::Ten);
        assert_eq!(pager.current_page, 1);
    }

    #[test]
    fn range_label_formats_bounds() {
        assert_eq!(range_label(1, PageSize::Five, 12), "1-5 of 12");
        assert_eq!(range_label(3, PageSize::Five, 12), "11-12 of 12");
        assert_eq!(range_label(1, PageSize::Five, 0), "0–0 of 0");
    }

    #[test]
    fn format_day_count_drops_trailing_zero() {
        assert_eq!(format_day_count(3.0), "3");
        assert_eq!(format_day_count(0.5), "0.5");
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;
    use chrono::NaiveDate;

    #[test]
    fn filter_form_builds_criteria_and_rejects_bad_dates() {
        with_runtime(|| {
            let form = FilterFormState::default();
            assert_eq!(form.to_criteria().unwrap(), FilterCriteria::default());

            form.status_signal().set("Rejected".into());
            form.date_from_signal().set("2024-01-01".into());
            let criteria = form.to_criteria().unwrap();
            assert_eq!(criteria.status, StatusFilter::Only(LeaveStatus::Rejected));
            assert_eq!(criteria.date_from, NaiveDate::from_ymd_opt(2024, 1, 1));

            form.date_to_signal().set("01/31/2024".into());
            let err = form.to_criteria().unwrap_err();
            assert_eq!(err.code, "VALIDATION_ERROR");

            form.reset();
            assert_eq!(form.status_signal().get_untracked(), "All");
        });
    }
}
