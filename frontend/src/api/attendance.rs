use super::{
    client::{path_segment, ApiClient},
    types::{ApiError, AttendanceEnvelope, AttendanceRecord, ClockRequest, RegularizationEntry},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockAction {
    CheckIn,
    CheckOut,
}

impl ClockAction {
    fn path(self) -> &'static str {
        match self {
            Self::CheckIn => "checkin",
            Self::CheckOut => "checkout",
        }
    }
}

impl ApiClient {
    pub async fn today_attendance(
        &self,
        user_id: &str,
    ) -> Result<Option<AttendanceRecord>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(self.http_client().get(format!(
                "{}/attendance/today/{}",
                base_url,
                path_segment(user_id)
            )))
            .await?;
        let envelope: AttendanceEnvelope = self.map_json_response(response).await?;
        Ok(envelope.attendance)
    }

    pub async fn clock(
        &self,
        user_id: &str,
        action: ClockAction,
        request: &ClockRequest,
    ) -> Result<Option<AttendanceRecord>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .post(format!(
                        "{}/attendance/{}/{}",
                        base_url,
                        path_segment(user_id),
                        action.path()
                    ))
                    .json(request),
            )
            .await?;
        let envelope: AttendanceEnvelope = self.map_json_response(response).await?;
        Ok(envelope.attendance)
    }

    pub async fn my_regularizations(
        &self,
        user_id: &str,
    ) -> Result<Vec<RegularizationEntry>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(self.http_client().get(format!(
                "{}/attendance/regularization/my/{}",
                base_url,
                path_segment(user_id)
            )))
            .await?;
        self.map_json_response(response).await
    }
}
