use super::{
    client::{path_segment, ApiClient},
    types::{ApiError, PersonResponse},
};

impl ApiClient {
    pub async fn get_person(&self, user_id: &str) -> Result<PersonResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .get(format!("{}/users/{}", base_url, path_segment(user_id))),
            )
            .await?;
        self.map_json_response(response).await
    }
}
