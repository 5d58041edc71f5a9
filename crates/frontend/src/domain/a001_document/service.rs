//! Documents: `/documents` CRUD, multipart upload, vector-store info.

use crate::shared::api::transport::{FilePart, MultipartForm};
use crate::shared::api::{ApiClient, ApiError, CancelToken};
use contracts::domain::a001_document::{
    CreateDocumentRequest, Document, DocumentResponse, UpdateDocumentRequest,
    UploadDocumentRequest, UploadDocumentResponse, VectorStoreInfo,
};
use contracts::shared::{Listing, PageRequest, PaginatedResponse, Single};

#[derive(Clone)]
pub struct DocumentService {
    api: ApiClient,
}

fn item_path(id: &str) -> String {
    format!("/documents/{}", urlencoding::encode(id))
}

impl DocumentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        page: PageRequest,
        cancel: &CancelToken,
    ) -> Result<PaginatedResponse<Document>, ApiError> {
        let listing: Listing<DocumentResponse> =
            self.api.get_query("/documents", &page.query(), cancel).await?;
        Ok(listing.into_page(page).try_map(Document::try_from)?)
    }

    pub async fn get(&self, id: &str, cancel: &CancelToken) -> Result<Document, ApiError> {
        let resp: Single<DocumentResponse> = self.api.get(&item_path(id), cancel).await?;
        Ok(Document::try_from(resp.into_inner())?)
    }

    pub async fn create(
        &self,
        request: &CreateDocumentRequest,
        cancel: &CancelToken,
    ) -> Result<Document, ApiError> {
        let resp: Single<DocumentResponse> = self.api.post_json("/documents", request, cancel).await?;
        Ok(Document::try_from(resp.into_inner())?)
    }

    pub async fn update(
        &self,
        id: &str,
        request: &UpdateDocumentRequest,
        cancel: &CancelToken,
    ) -> Result<Document, ApiError> {
        let resp: Single<DocumentResponse> = self.api.put_json(&item_path(id), request, cancel).await?;
        Ok(Document::try_from(resp.into_inner())?)
    }

    /// Deleting an id that no longer exists is an error (404), not a no-op
    pub async fn delete(&self, id: &str, cancel: &CancelToken) -> Result<(), ApiError> {
        self.api.delete(&item_path(id), cancel).await
    }

    pub async fn upload(
        &self,
        request: UploadDocumentRequest,
        cancel: &CancelToken,
    ) -> Result<UploadDocumentResponse, ApiError> {
        let form = MultipartForm {
            fields: request.form_fields(),
            file: Some(FilePart {
                field: "file".to_string(),
                filename: request.filename,
                content_type: request.content_type,
                bytes: request.bytes,
            }),
        };
        log::info!(
            "upload {} ({})",
            form.file.as_ref().map(|f| f.filename.as_str()).unwrap_or_default(),
            form.field("category").unwrap_or_default()
        );
        let resp: Single<UploadDocumentResponse> =
            self.api.post_multipart("/documents/upload", form, cancel).await?;
        Ok(resp.into_inner())
    }

    pub async fn vector_info(&self, cancel: &CancelToken) -> Result<VectorStoreInfo, ApiError> {
        let resp: Single<VectorStoreInfo> = self.api.get("/documents/vector/info", cancel).await?;
        Ok(resp.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::{FakeBackend, MockTransport, BASE};
    use contracts::domain::a001_document::{DocumentCategory, ProcessingStatus};
    use futures::executor::block_on;
    use serde_json::json;
    use std::collections::HashSet;

    fn service(mock: &MockTransport) -> DocumentService {
        DocumentService::new(ApiClient::new(BASE, mock.shared()))
    }

    #[test]
    fn test_pages_are_disjoint_and_ordered() {
        let backend = FakeBackend::new();
        backend.seed_documents(7);
        let svc = service(&backend.transport());
        let token = CancelToken::new();

        let mut seen = Vec::new();
        let mut request = Some(PageRequest::new(1, 3));
        while let Some(page_req) = request {
            let page = block_on(svc.list(page_req, &token)).unwrap();
            assert!(page.data.len() <= page.per_page as usize);
            assert!(page.page <= page.total_pages);
            seen.extend(page.data.iter().map(|d| d.filename.clone()));
            request = page.next_page();
        }

        assert_eq!(seen.len(), 7);
        let unique: HashSet<_> = seen.iter().collect();
        assert_eq!(unique.len(), 7);
        let mut sorted = seen.clone();
        sorted.sort();
        assert_eq!(seen, sorted);
    }

    #[test]
    fn test_list_converts_naive_timestamps() {
        let backend = FakeBackend::new();
        backend.seed_documents(1);
        let svc = service(&backend.transport());
        let page = block_on(svc.list(PageRequest::default(), &CancelToken::new())).unwrap();
        let doc = &page.data[0];
        assert_eq!(doc.created_at.to_rfc3339(), "2024-05-01T10:00:00+00:00");
        assert_eq!(doc.status, ProcessingStatus::Completed);
    }

    #[test]
    fn test_list_sends_paging_query() {
        let mock = MockTransport::new();
        mock.respond_json(200, json!([]));
        let svc = service(&mock);
        block_on(svc.list(PageRequest::new(3, 20), &CancelToken::new())).unwrap();
        let url = mock.last_request().unwrap().url;
        assert!(url.contains("skip=40"));
        assert!(url.contains("limit=20"));
    }

    #[test]
    fn test_upload_then_list_includes_document() {
        let backend = FakeBackend::new();
        let mock = backend.transport();
        let svc = service(&mock);
        let token = CancelToken::new();

        let req = UploadDocumentRequest::new("icms_convenio.pdf", "application/pdf", b"%PDF-1.4".to_vec())
            .with_category(DocumentCategory::Legislacao)
            .with_tags("icms,fiscal");
        let uploaded = block_on(svc.upload(req, &token)).unwrap();
        assert_eq!(uploaded.filename, "icms_convenio.pdf");

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.header("content-type"), None);

        let page = block_on(svc.list(PageRequest::default(), &token)).unwrap();
        let doc = page
            .data
            .iter()
            .find(|d| d.filename == "icms_convenio.pdf")
            .expect("uploaded document is listed");
        assert_eq!(doc.category, DocumentCategory::Legislacao);
        assert_eq!(doc.category.as_str(), "legislacao");
        assert_eq!(doc.tag_list(), vec!["icms", "fiscal"]);
    }

    #[test]
    fn test_delete_twice_fails_the_second_time() {
        let backend = FakeBackend::new();
        backend.seed_documents(1);
        let svc = service(&backend.transport());
        let token = CancelToken::new();
        let id = block_on(svc.list(PageRequest::default(), &token)).unwrap().data[0].id.clone();

        block_on(svc.delete(&id, &token)).unwrap();
        let err = block_on(svc.delete(&id, &token)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Document not found");
    }

    #[test]
    fn test_get_accepts_wrapped_resource() {
        let backend = FakeBackend::new();
        backend.seed_documents(2);
        let svc = service(&backend.transport());
        let doc = block_on(svc.get("2", &CancelToken::new())).unwrap();
        assert_eq!(doc.filename, "doc_01.pdf");
    }

    #[test]
    fn test_bad_timestamp_is_parse_error() {
        let mock = MockTransport::new();
        mock.respond_json(
            200,
            json!({ "id": "1", "filename": "a.pdf", "created_at": "ontem" }),
        );
        let err = block_on(service(&mock).get("1", &CancelToken::new())).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_every_call_rejects_when_offline() {
        let backend = FakeBackend::new();
        backend.set_offline(true);
        let svc = service(&backend.transport());
        let token = CancelToken::new();
        assert!(block_on(svc.list(PageRequest::default(), &token)).unwrap_err().is_network());
        assert!(block_on(svc.get("1", &token)).unwrap_err().is_network());
        assert!(block_on(svc.delete("1", &token)).unwrap_err().is_network());
        assert!(block_on(svc.vector_info(&token)).unwrap_err().is_network());
        let req = UploadDocumentRequest::new("a.pdf", "application/pdf", vec![1]);
        assert!(block_on(svc.upload(req, &token)).unwrap_err().is_network());
    }

    #[test]
    fn test_vector_info_keeps_unknown_fields() {
        let mock = MockTransport::new();
        mock.respond_json(200, json!({ "collection_name": "acfi", "document_count": 4, "dimension": 384 }));
        let info = block_on(service(&mock).vector_info(&CancelToken::new())).unwrap();
        assert_eq!(info.document_count, Some(4));
        assert_eq!(info.extra["dimension"], 384);
    }
}
