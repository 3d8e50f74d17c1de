use super::{
    client::{path_segment, ApiClient},
    types::{ApiError, ApplyLeaveRequest, LeaveRecord},
};

impl ApiClient {
    pub async fn list_my_leaves(&self, user_id: &str) -> Result<Vec<LeaveRecord>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .get(format!("{}/leave/my/{}", base_url, path_segment(user_id))),
            )
            .await?;
        self.map_json_response(response).await
    }

    pub async fn delete_leave(&self, leave_id: &str) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .delete(format!("{}/leave/{}", base_url, path_segment(leave_id))),
            )
            .await?;
        self.map_empty_response(response).await
    }

    pub async fn apply_leave(&self, request: &ApplyLeaveRequest) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .post(format!("{}/leave/apply", base_url))
                    .json(request),
            )
            .await?;
        self.map_empty_response(response).await
    }
}
