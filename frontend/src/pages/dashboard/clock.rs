use crate::api::{AttendanceRecord, ClockAction, ClockRequest};
use crate::pages::dashboard::{
    repository::{fetch_leave_for_day, DashboardGateway},
    types::{AttendanceError, CheckOutOutcome},
    utils::{check_in_location, checkout_message, hours_between, maps_url},
};
use crate::state::{prompt::ConfirmPrompt, session::WorkMode};
use crate::utils::{location::LocationProvider, time::format_clock_time};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// What the dashboard knows when a clock button is pressed.
#[derive(Debug, Clone)]
pub struct ClockContext {
    pub user_id: Option<String>,
    pub today: NaiveDate,
    pub time_zone: Tz,
    pub work_mode: WorkMode,
    pub current: Option<AttendanceRecord>,
}

impl ClockContext {
    fn user_id(&self) -> Result<&str, AttendanceError> {
        self.user_id.as_deref().ok_or(AttendanceError::MissingUser)
    }

    fn checked_in_at(&self) -> Option<DateTime<Utc>> {
        self.current.as_ref().and_then(|record| record.check_in)
    }
}

async fn clock_request(
    location: &dyn LocationProvider,
    work_mode: WorkMode,
) -> Result<ClockRequest, AttendanceError> {
    let fix = location.current_fix().await?;
    Ok(ClockRequest {
        lat: fix.lat,
        lng: fix.lng,
        address: fix.address,
        mode: work_mode.clock_mode().to_string(),
    })
}

pub async fn check_in(
    gateway: &dyn DashboardGateway,
    location: &dyn LocationProvider,
    ctx: &ClockContext,
) -> Result<Option<AttendanceRecord>, AttendanceError> {
    let user_id = ctx.user_id()?;
    if fetch_leave_for_day(gateway, user_id, ctx.today).await.is_some() {
        return Err(AttendanceError::OnLeaveToday);
    }
    if let Some(at) = ctx.checked_in_at() {
        return Err(AttendanceError::AlreadyCheckedIn(format_clock_time(
            at,
            ctx.time_zone,
        )));
    }
    let request = clock_request(location, ctx.work_mode).await?;
    log::info!("Checking in ({})", request.mode);
    Ok(gateway.clock(user_id, ClockAction::CheckIn, &request).await?)
}

pub async fn check_out(
    gateway: &dyn DashboardGateway,
    location: &dyn LocationProvider,
    prompt: &dyn ConfirmPrompt,
    ctx: &ClockContext,
    now: DateTime<Utc>,
) -> Result<CheckOutOutcome, AttendanceError> {
    let checked_in_at = ctx.checked_in_at().ok_or(AttendanceError::NotCheckedIn)?;
    let user_id = ctx.user_id()?;
    let request = clock_request(location, ctx.work_mode).await?;

    let hours = hours_between(checked_in_at, now);
    if !prompt.confirm(&checkout_message(hours)).await {
        log::debug!("Check-out declined after {:.2} hrs", hours);
        return Ok(CheckOutOutcome::Cancelled);
    }
    let record = gateway
        .clock(user_id, ClockAction::CheckOut, &request)
        .await?;
    Ok(CheckOutOutcome::CheckedOut(record))
}

/// Maps link for today's check-in location.
pub fn location_link(current: Option<&AttendanceRecord>) -> Result<String, AttendanceError> {
    let record = current
        .filter(|record| record.check_in.is_some())
        .ok_or(AttendanceError::NoCheckInRecord)?;
    check_in_location(record)
        .and_then(maps_url)
        .ok_or(AttendanceError::NoLocationData)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{
        ApiError, ApplyLeaveRequest, GeoPoint, LeaveRecord, LeaveStatus, RegularizationEntry,
    };
    use crate::pages::my_leaves::utils::fixtures::record;
    use crate::utils::location::{GeoFix, LocationError};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeDesk {
        leaves: Option<Vec<LeaveRecord>>,
        clocked: RefCell<Vec<(ClockAction, ClockRequest)>>,
    }

    #[async_trait(?Send)]
    impl DashboardGateway for FakeDesk {
        async fn today_attendance(
            &self,
            _user_id: &str,
        ) -> Result<Option<AttendanceRecord>, ApiError> {
            Ok(None)
        }

        async fn list_leaves(&self, _user_id: &str) -> Result<Vec<LeaveRecord>, ApiError> {
            self.leaves
                .clone()
                .ok_or_else(|| ApiError::request_failed("offline"))
        }

        async fn regularizations(
            &self,
            _user_id: &str,
        ) -> Result<Vec<RegularizationEntry>, ApiError> {
            Ok(Vec::new())
        }

        async fn clock(
            &self,
            _user_id: &str,
            action: ClockAction,
            request: &ClockRequest,
        ) -> Result<Option<AttendanceRecord>, ApiError> {
            self.clocked.borrow_mut().push((action, request.clone()));
            Ok(Some(AttendanceRecord {
                id: "att-1".into(),
                check_in: Some(Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap()),
                ..AttendanceRecord::default()
            }))
        }

        async fn apply_leave(&self, _request: &ApplyLeaveRequest) -> Result<(), ApiError> {
            Ok(())
        }
    }

    struct FixedLocation(Result<GeoFix, LocationError>);

    #[async_trait(?Send)]
    impl LocationProvider for FixedLocation {
        async fn current_fix(&self) -> Result<GeoFix, LocationError> {
            self.0.clone()
        }
    }

    fn home() -> FixedLocation {
        FixedLocation(Ok(GeoFix {
            lat: 12.9,
            lng: 77.6,
            address: "Home".into(),
        }))
    }

    struct RecordingPrompt {
        answer: bool,
        asked: RefCell<Option<String>>,
        calls: Cell<usize>,
    }

    impl RecordingPrompt {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                asked: RefCell::new(None),
                calls: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl ConfirmPrompt for RecordingPrompt {
        async fn confirm(&self, message: &str) -> bool {
            self.calls.set(self.calls.get() + 1);
            *self.asked.borrow_mut() = Some(message.to_string());
            self.answer
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn ctx(current: Option<AttendanceRecord>) -> ClockContext {
        ClockContext {
            user_id: Some("u1".into()),
            today: today(),
            time_zone: Tz::Asia__Kolkata,
            work_mode: WorkMode::Wfh,
            current,
        }
    }

    fn checked_in(hour: u32) -> AttendanceRecord {
        AttendanceRecord {
            id: "att-1".into(),
            check_in: Some(Utc.with_ymd_and_hms(2024, 5, 10, hour, 0, 0).unwrap()),
            ..AttendanceRecord::default()
        }
    }

    #[tokio::test]
    async fn check_in_posts_fix_with_work_mode() {
        let desk = FakeDesk {
            leaves: Some(Vec::new()),
            ..FakeDesk::default()
        };
        let record = check_in(&desk, &home(), &ctx(None)).await.unwrap();
        assert!(record.is_some());
        let clocked = desk.clocked.borrow();
        assert_eq!(clocked.len(), 1);
        assert_eq!(clocked[0].0, ClockAction::CheckIn);
        assert_eq!(clocked[0].1.mode, "WFH");
        assert_eq!(clocked[0].1.address, "Home");
    }

    #[tokio::test]
    async fn check_in_rules_apply_in_order() {
        let desk = FakeDesk::default();
        let mut anonymous = ctx(None);
        anonymous.user_id = None;
        assert_eq!(
            check_in(&desk, &home(), &anonymous).await,
            Err(AttendanceError::MissingUser)
        );

        let mut leave = record("l1", LeaveStatus::Approved, (2024, 5, 10));
        leave.date_to = NaiveDate::from_ymd_opt(2024, 5, 12);
        let on_leave = FakeDesk {
            leaves: Some(vec![leave]),
            ..FakeDesk::default()
        };
        assert_eq!(
            check_in(&on_leave, &home(), &ctx(Some(checked_in(4)))).await,
            Err(AttendanceError::OnLeaveToday)
        );

        assert_eq!(
            check_in(&desk, &home(), &ctx(Some(checked_in(4)))).await,
            Err(AttendanceError::AlreadyCheckedIn("09:30".into()))
        );

        let denied = FixedLocation(Err(LocationError::Denied));
        assert_eq!(
            check_in(&desk, &denied, &ctx(None)).await,
            Err(AttendanceError::Location(LocationError::Denied))
        );
        assert!(desk.clocked.borrow().is_empty());
    }

    #[tokio::test]
    async fn rejected_leave_does_not_block_check_in() {
        let desk = FakeDesk {
            leaves: Some(vec![record("l1", LeaveStatus::Rejected, (2024, 5, 10))]),
            ..FakeDesk::default()
        };
        assert!(check_in(&desk, &home(), &ctx(None)).await.is_ok());
    }

    #[tokio::test]
    async fn check_out_asks_for_confirmation_with_verdict() {
        let desk = FakeDesk::default();
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap();

        let declined = RecordingPrompt::new(false);
        let outcome = check_out(&desk, &home(), &declined, &ctx(Some(checked_in(4))), now)
            .await
            .unwrap();
        assert_eq!(outcome, CheckOutOutcome::Cancelled);
        assert!(desk.clocked.borrow().is_empty());
        let asked = declined.asked.borrow().clone().unwrap();
        assert!(asked.contains("5.50 hrs"));
        assert!(asked.contains("Half Day will be considered."));

        let accepted = RecordingPrompt::new(true);
        let outcome = check_out(&desk, &home(), &accepted, &ctx(Some(checked_in(4))), now)
            .await
            .unwrap();
        assert!(matches!(outcome, CheckOutOutcome::CheckedOut(Some(_))));
        assert_eq!(desk.clocked.borrow()[0].0, ClockAction::CheckOut);
    }

    #[tokio::test]
    async fn check_out_requires_check_in_and_location() {
        let desk = FakeDesk::default();
        let prompt = RecordingPrompt::new(true);
        let now = Utc::now();
        assert_eq!(
            check_out(&desk, &home(), &prompt, &ctx(None), now).await,
            Err(AttendanceError::NotCheckedIn)
        );
        let unsupported = FixedLocation(Err(LocationError::Unsupported));
        assert_eq!(
            check_out(&desk, &unsupported, &prompt, &ctx(Some(checked_in(4))), now).await,
            Err(AttendanceError::Location(LocationError::Unsupported))
        );
        assert_eq!(prompt.calls.get(), 0);
    }

    #[test]
    fn location_link_reports_missing_data() {
        assert_eq!(location_link(None), Err(AttendanceError::NoCheckInRecord));

        let mut record = checked_in(4);
        assert_eq!(
            location_link(Some(&record)),
            Err(AttendanceError::NoLocationData)
        );

        record.check_in_location = Some(GeoPoint {
            lat: Some(12.9),
            lng: Some(77.6),
            address: None,
        });
        assert_eq!(
            location_link(Some(&record)).as_deref(),
            Ok("https://www.google.com/maps?q=12.9,77.6")
        );
    }
}
