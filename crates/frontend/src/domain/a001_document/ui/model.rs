//! Documents page - Model

use crate::domain::a001_document::library::SelectedFile;
use crate::shared::api::{ApiError, CancelToken};
use crate::shared::fallback::{recover, Recovered};
use crate::shared::services::Services;
use chrono::Utc;
use contracts::domain::a001_document::{Document, UploadDocumentRequest, VectorStoreInfo};
use contracts::shared::{PageRequest, PaginatedResponse};

pub async fn fetch_page(
    services: &Services,
    page: PageRequest,
    cancel: &CancelToken,
) -> Result<Recovered<PaginatedResponse<Document>>, ApiError> {
    let result = services.documents.list(page, cancel).await;
    recover(result, || services.fallback.documents(page, Utc::now()))
}

/// Upload, then read the stored document back so the card shows server state.
///
/// Once the upload is stored, a failed read-back falls back to what the
/// upload response and the sent file describe.
pub async fn upload(
    services: &Services,
    request: UploadDocumentRequest,
    cancel: &CancelToken,
) -> Result<Document, ApiError> {
    let file = request.describe();
    let uploaded = services.documents.upload(request, cancel).await?;
    log::info!("documento {} enviado ({})", uploaded.id, uploaded.status.label());
    match services.documents.get(&uploaded.id, cancel).await {
        Ok(doc) => Ok(doc),
        Err(ApiError::Cancelled) => Err(ApiError::Cancelled),
        Err(e) => {
            log::warn!("documento {} enviado, mas não foi possível relê-lo: {e}", uploaded.id);
            Ok(uploaded.into_document(file, Utc::now())?)
        }
    }
}

pub async fn delete(services: &Services, id: &str, cancel: &CancelToken) -> Result<(), ApiError> {
    services.documents.delete(id, cancel).await
}

/// Re-read documents still being processed; ones that fail to load are skipped
pub async fn fetch_documents(services: &Services, ids: &[String], cancel: &CancelToken) -> Vec<Document> {
    let reads = ids.iter().map(|id| services.documents.get(id, cancel));
    futures::future::join_all(reads)
        .await
        .into_iter()
        .zip(ids)
        .filter_map(|(result, id)| match result {
            Ok(doc) => Some(doc),
            Err(e) => {
                log::warn!("falha ao consultar documento {id}: {e}");
                None
            }
        })
        .collect()
}

/// Vector store details are decoration; failures only get logged
pub async fn fetch_vector_info(services: &Services, cancel: &CancelToken) -> Option<VectorStoreInfo> {
    match services.documents.vector_info(cancel).await {
        Ok(info) => Some(info),
        Err(e) => {
            log::debug!("vector store indisponível: {e}");
            None
        }
    }
}

/// Read a picked browser file into memory
pub async fn read_file(file: web_sys::File) -> Result<SelectedFile, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(SelectedFile {
        name: file.name(),
        content_type: file.type_(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::{json_response, FakeBackend, MockTransport, BASE};
    use crate::shared::api::transport::{Method, TransportError};
    use crate::shared::api::ApiClient;
    use crate::shared::config::{AppConfig, EnvOverrides};
    use contracts::domain::a001_document::{DocumentCategory, ProcessingStatus};
    use serde_json::json;
    use futures::executor::block_on;

    fn services(backend: &FakeBackend, mode: &str) -> Services {
        let config = AppConfig::parse("[api]\nbase_url = \"http://localhost:8000/api/v1\"\n")
            .unwrap()
            .apply(EnvOverrides {
                fallback_mode: Some(mode),
                ..Default::default()
            })
            .unwrap();
        Services::new(config, ApiClient::new(BASE, backend.transport().shared()))
    }

    #[test]
    fn test_upload_returns_stored_document() {
        let backend = FakeBackend::new();
        let services = services(&backend, "live");
        let request = UploadDocumentRequest::new("lei_kandir.pdf", "application/pdf", b"%PDF-1.4".to_vec())
            .with_category(DocumentCategory::Legislacao)
            .with_tags("icms, fiscal");

        let doc = block_on(upload(&services, request, &CancelToken::new())).unwrap();

        assert_eq!(doc.filename, "lei_kandir.pdf");
        assert_eq!(doc.category, DocumentCategory::Legislacao);
    }

    #[test]
    fn test_stored_upload_survives_failed_read_back() {
        let mock = MockTransport::new();
        mock.with_handler(|req| match req.method {
            Method::Post => Ok(json_response(
                201,
                json!({ "id": "7", "filename": "ricms.pdf", "status": "pending" }),
            )),
            _ => Err(TransportError::Unreachable("blip".into())),
        });
        let config = AppConfig::parse("[api]\nbase_url = \"http://localhost:8000/api/v1\"\n").unwrap();
        let services = Services::new(config, ApiClient::new(BASE, mock.shared()));
        let request = UploadDocumentRequest::new("ricms.pdf", "application/pdf", b"%PDF".to_vec())
            .with_category(DocumentCategory::Legislacao)
            .with_tags("icms");

        let doc = block_on(upload(&services, request, &CancelToken::new())).unwrap();

        assert_eq!(mock.request_count(), 2);
        assert_eq!(doc.id, "7");
        assert_eq!(doc.file_size, 4);
        assert_eq!(doc.category, DocumentCategory::Legislacao);
        assert_eq!(doc.status, ProcessingStatus::Pending);
    }

    #[test]
    fn test_offline_page_uses_fixtures_when_configured() {
        let backend = FakeBackend::new();
        backend.set_offline(true);

        let live = block_on(fetch_page(&services(&backend, "live"), PageRequest::first(10), &CancelToken::new()));
        assert!(live.unwrap_err().is_network());

        let fixtures = block_on(fetch_page(&services(&backend, "fixtures"), PageRequest::first(10), &CancelToken::new()))
            .unwrap();
        assert!(fixtures.degraded);
        assert!(!fixtures.value.data.is_empty());
    }

    #[test]
    fn test_fetch_documents_skips_missing_ids() {
        let backend = FakeBackend::new();
        let services = services(&backend, "live");
        let request = UploadDocumentRequest::new("ricms.txt", "text/plain", b"art. 1".to_vec());
        let doc = block_on(upload(&services, request, &CancelToken::new())).unwrap();

        let ids = vec![doc.id.clone(), "missing".to_string()];
        let found = block_on(fetch_documents(&services, &ids, &CancelToken::new()));

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, doc.id);
    }

    #[test]
    fn test_vector_info_failure_is_swallowed() {
        let backend = FakeBackend::new();
        backend.set_offline(true);
        let info = block_on(fetch_vector_info(&services(&backend, "live"), &CancelToken::new()));
        assert!(info.is_none());
    }
}
