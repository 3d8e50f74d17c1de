use crate::api::{ApiClient, ApiError, LeaveRecord};
use async_trait::async_trait;
use std::rc::Rc;

/// Remote operations the leave list depends on.
#[async_trait(?Send)]
pub trait LeaveGateway {
    /// Leaves of `user_id`, newest first.
    async fn list_leaves(&self, user_id: &str) -> Result<Vec<LeaveRecord>, ApiError>;
    async fn person_name(&self, person_id: &str) -> Result<String, ApiError>;
    async fn delete_leave(&self, leave_id: &str) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct LeavesRepository {
    client: Rc<ApiClient>,
}

impl LeavesRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }
}

/// Newest first by `createdAt`, then `appliedAt`; undated records keep their
/// relative order at the end.
pub fn sort_newest_first(records: &mut [LeaveRecord]) {
    records.sort_by(|a, b| b.submitted_at().cmp(&a.submitted_at()));
}

#[async_trait(?Send)]
impl LeaveGateway for LeavesRepository {
    async fn list_leaves(&self, user_id: &str) -> Result<Vec<LeaveRecord>, ApiError> {
        let mut records = self.client.list_my_leaves(user_id).await?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn person_name(&self, person_id: &str) -> Result<String, ApiError> {
        let person = self.client.get_person(person_id).await?;
        Ok(person.name.unwrap_or_default())
    }

    async fn delete_leave(&self, leave_id: &str) -> Result<(), ApiError> {
        self.client.delete_leave(leave_id).await
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use serde_json::json;

    fn repo(server: &MockServer) -> LeavesRepository {
        LeavesRepository::new(ApiClient::new_with_base_url(server.url("/api")))
    }

    #[tokio::test]
    async fn leaves_repository_calls_api() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/leave/my/u1");
            then.status(200).json_body(json!([
                {
                    "_id": "old",
                    "dateFrom": "2024-01-02",
                    "dateTo": "2024-01-02",
                    "appliedAt": "2024-01-01T00:00:00Z",
                    "status": "Approved"
                },
                {
                    "_id": "new",
                    "dateFrom": "2024-02-02",
                    "dateTo": "2024-02-03",
                    "createdAt": "2024-02-01T00:00:00Z",
                    "status": "Pending"
                }
            ]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/users/m1");
            then.status(200).json_body(json!({ "name": null }));
        });
        server.mock(|when, then| {
            when.method(DELETE).path("/api/leave/new");
            then.status(200).json_body(json!({}));
        });

        let repo = repo(&server);
        let leaves = repo.list_leaves("u1").await.unwrap();
        let ids: Vec<_> = leaves.iter().map(|leave| leave.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(repo.person_name("m1").await.unwrap(), "");
        repo.delete_leave("new").await.unwrap();
        assert_eq!(server.hits(DELETE, "/api/leave/new"), 1);
    }

    #[tokio::test]
    async fn leaves_repository_surfaces_errors() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/api/leave/l9");
            then.status(404).json_body(json!({ "message": "Leave not found" }));
        });
        let err = repo(&server).delete_leave("l9").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
