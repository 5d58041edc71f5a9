//! Chat sessions: `/sessions` CRUD.

use crate::shared::api::{ApiClient, ApiError, CancelToken};
use contracts::domain::a002_chat_session::{
    ChatSession, CreateSessionRequest, SessionFilter, SessionResponse, UpdateSessionRequest,
};
use contracts::shared::{Listing, PageRequest, PaginatedResponse, Single};
use serde::Serialize;

#[derive(Clone)]
pub struct SessionService {
    api: ApiClient,
}

#[derive(Serialize)]
struct SessionQuery<'a> {
    page: u32,
    per_page: u32,
    skip: u64,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
}

fn item_path(id: &str) -> String {
    format!("/sessions/{}", urlencoding::encode(id))
}

impl SessionService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        page: PageRequest,
        filter: &SessionFilter,
        cancel: &CancelToken,
    ) -> Result<PaginatedResponse<ChatSession>, ApiError> {
        let q = page.query();
        let query = SessionQuery {
            page: q.page,
            per_page: q.per_page,
            skip: q.skip,
            limit: q.limit,
            user_id: filter.user_id.as_deref(),
        };
        let listing: Listing<SessionResponse> = self.api.get_query("/sessions", &query, cancel).await?;
        Ok(listing.into_page(page).try_map(ChatSession::try_from)?)
    }

    pub async fn get(&self, id: &str, cancel: &CancelToken) -> Result<ChatSession, ApiError> {
        let resp: Single<SessionResponse> = self.api.get(&item_path(id), cancel).await?;
        Ok(ChatSession::try_from(resp.into_inner())?)
    }

    pub async fn create(
        &self,
        request: &CreateSessionRequest,
        cancel: &CancelToken,
    ) -> Result<ChatSession, ApiError> {
        request.validate().map_err(ApiError::Invalid)?;
        let resp: Single<SessionResponse> = self.api.post_json("/sessions", request, cancel).await?;
        Ok(ChatSession::try_from(resp.into_inner())?)
    }

    pub async fn update(
        &self,
        id: &str,
        request: &UpdateSessionRequest,
        cancel: &CancelToken,
    ) -> Result<ChatSession, ApiError> {
        let resp: Single<SessionResponse> = self.api.put_json(&item_path(id), request, cancel).await?;
        Ok(ChatSession::try_from(resp.into_inner())?)
    }

    pub async fn delete(&self, id: &str, cancel: &CancelToken) -> Result<(), ApiError> {
        self.api.delete(&item_path(id), cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::{FakeBackend, MockTransport, BASE};
    use chrono::Utc;
    use futures::executor::block_on;
    use serde_json::json;

    fn service(mock: &MockTransport) -> SessionService {
        SessionService::new(ApiClient::new(BASE, mock.shared()))
    }

    #[test]
    fn test_create_session_scenario() {
        let backend = FakeBackend::new();
        let svc = service(&backend.transport());
        let session = block_on(svc.create(&CreateSessionRequest::titled("ICMS test"), &CancelToken::new())).unwrap();
        assert!(!session.id.is_empty());
        assert!(session.created_at <= Utc::now());
        assert_eq!(session.display_title(), "ICMS test");
    }

    #[test]
    fn test_create_sends_name_field() {
        let mock = MockTransport::new();
        mock.respond_json(
            201,
            json!({ "id": "9", "name": "IPI", "created_at": "2024-05-01T10:00:00", "updated_at": "2024-05-01T10:00:00" }),
        );
        let req = CreateSessionRequest {
            description: Some("Conversa iniciada".into()),
            ..CreateSessionRequest::titled("IPI")
        };
        let session = block_on(service(&mock).create(&req, &CancelToken::new())).unwrap();
        assert_eq!(session.id, "9");

        let sent = mock.last_request().unwrap();
        let body: serde_json::Value = match sent.body {
            crate::shared::api::transport::RequestBody::Json(json) => serde_json::from_str(&json).unwrap(),
            other => panic!("unexpected body {other:?}"),
        };
        assert_eq!(body, json!({ "name": "IPI", "description": "Conversa iniciada" }));
    }

    #[test]
    fn test_blank_name_is_rejected_locally() {
        let mock = MockTransport::new();
        let err = block_on(service(&mock).create(&CreateSessionRequest::titled("  "), &CancelToken::new()))
            .unwrap_err();
        assert!(err.is_invalid());
        assert_eq!(err.status(), 0);
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_list_filters_by_owner() {
        let mock = MockTransport::new();
        mock.respond_json(200, json!({ "data": [] }));
        let filter = SessionFilter {
            user_id: Some("user1".into()),
        };
        let page = block_on(service(&mock).list(PageRequest::default(), &filter, &CancelToken::new())).unwrap();
        assert!(page.data.is_empty());
        assert!(!page.has_more());
        assert!(mock.last_request().unwrap().url.contains("user_id=user1"));
    }

    #[test]
    fn test_list_pages_are_disjoint() {
        let backend = FakeBackend::new();
        for name in ["a", "b", "c", "d", "e"] {
            backend.seed_session(name);
        }
        let svc = service(&backend.transport());
        let token = CancelToken::new();
        let first = block_on(svc.list(PageRequest::new(1, 2), &SessionFilter::default(), &token)).unwrap();
        let second = block_on(svc.list(PageRequest::new(2, 2), &SessionFilter::default(), &token)).unwrap();
        let third = block_on(svc.list(PageRequest::new(3, 2), &SessionFilter::default(), &token)).unwrap();

        let titles: Vec<_> = [first.data.as_slice(), second.data.as_slice(), third.data.as_slice()]
            .concat()
            .iter()
            .map(|s| s.display_title().to_string())
            .collect();
        assert_eq!(titles, vec!["a", "b", "c", "d", "e"]);
        assert!(first.has_more() && second.has_more());
        assert!(!third.has_more());
    }

    #[test]
    fn test_update_keeps_updated_at_monotonic() {
        let backend = FakeBackend::new();
        let id = backend.seed_session("Antiga");
        let svc = service(&backend.transport());
        let token = CancelToken::new();
        let before = block_on(svc.get(&id, &token)).unwrap();
        let req = UpdateSessionRequest {
            name: Some("Nova".into()),
            ..Default::default()
        };
        let after = block_on(svc.update(&id, &req, &token)).unwrap();
        assert_eq!(after.display_title(), "Nova");
        assert!(after.updated_at >= before.updated_at);
    }

    #[test]
    fn test_delete_missing_session_errors() {
        let backend = FakeBackend::new();
        let id = backend.seed_session("x");
        let svc = service(&backend.transport());
        let token = CancelToken::new();
        block_on(svc.delete(&id, &token)).unwrap();
        let err = block_on(svc.delete(&id, &token)).unwrap_err();
        assert_eq!(err.status(), 404);
        assert!(block_on(svc.get(&id, &token)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_network_failure_rejects() {
        let backend = FakeBackend::new();
        backend.set_offline(true);
        let svc = service(&backend.transport());
        let token = CancelToken::new();
        assert!(block_on(svc.list(PageRequest::default(), &SessionFilter::default(), &token))
            .unwrap_err()
            .is_network());
        assert!(block_on(svc.create(&CreateSessionRequest::titled("x"), &token))
            .unwrap_err()
            .is_network());
        assert!(block_on(svc.update("1", &UpdateSessionRequest::default(), &token))
            .unwrap_err()
            .is_network());
    }
}
