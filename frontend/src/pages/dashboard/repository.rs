use crate::api::{
    ApiClient, ApiError, ApplyLeaveRequest, AttendanceRecord, ClockAction, ClockRequest,
    LeaveRecord, RegularizationEntry,
};
use crate::pages::dashboard::{
    types::PendingCounts,
    utils::{count_pending_leaves, count_pending_regularizations, leave_covering},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::rc::Rc;

/// Remote operations the dashboard depends on.
#[async_trait(?Send)]
pub trait DashboardGateway {
    async fn today_attendance(&self, user_id: &str)
        -> Result<Option<AttendanceRecord>, ApiError>;
    async fn list_leaves(&self, user_id: &str) -> Result<Vec<LeaveRecord>, ApiError>;
    async fn regularizations(&self, user_id: &str) -> Result<Vec<RegularizationEntry>, ApiError>;
    async fn clock(
        &self,
        user_id: &str,
        action: ClockAction,
        request: &ClockRequest,
    ) -> Result<Option<AttendanceRecord>, ApiError>;
    async fn apply_leave(&self, request: &ApplyLeaveRequest) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct DashboardRepository {
    client: Rc<ApiClient>,
}

impl DashboardRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }
}

#[async_trait(?Send)]
impl DashboardGateway for DashboardRepository {
    async fn today_attendance(
        &self,
        user_id: &str,
    ) -> Result<Option<AttendanceRecord>, ApiError> {
        self.client.today_attendance(user_id).await
    }

    async fn list_leaves(&self, user_id: &str) -> Result<Vec<LeaveRecord>, ApiError> {
        self.client.list_my_leaves(user_id).await
    }

    async fn regularizations(&self, user_id: &str) -> Result<Vec<RegularizationEntry>, ApiError> {
        self.client.my_regularizations(user_id).await
    }

    async fn clock(
        &self,
        user_id: &str,
        action: ClockAction,
        request: &ClockRequest,
    ) -> Result<Option<AttendanceRecord>, ApiError> {
        self.client.clock(user_id, action, request).await
    }

    async fn apply_leave(&self, request: &ApplyLeaveRequest) -> Result<(), ApiError> {
        self.client.apply_leave(request).await
    }
}

/// Today's record; a failed lookup counts as no record so check-in stays
/// possible.
pub async fn fetch_today_attendance<G: DashboardGateway + ?Sized>(
    gateway: &G,
    user_id: &str,
) -> Option<AttendanceRecord> {
    match gateway.today_attendance(user_id).await {
        Ok(record) => record,
        Err(err) => {
            log::warn!("No attendance record for today: {}", err);
            None
        }
    }
}

/// Non-rejected leave covering `today`; a failed lookup counts as no leave.
pub async fn fetch_leave_for_day<G: DashboardGateway + ?Sized>(
    gateway: &G,
    user_id: &str,
    today: NaiveDate,
) -> Option<LeaveRecord> {
    match gateway.list_leaves(user_id).await {
        Ok(records) => leave_covering(&records, today).cloned(),
        Err(err) => {
            log::warn!("Leave lookup before check-in failed: {}", err);
            None
        }
    }
}

pub async fn fetch_pending_counts<G: DashboardGateway + ?Sized>(
    gateway: &G,
    user_id: &str,
) -> Result<PendingCounts, ApiError> {
    let (leaves, regularizations) = futures::join!(
        gateway.list_leaves(user_id),
        gateway.regularizations(user_id)
    );
    Ok(PendingCounts {
        leaves: count_pending_leaves(&leaves?),
        regularizations: count_pending_regularizations(&regularizations?),
    })
}
