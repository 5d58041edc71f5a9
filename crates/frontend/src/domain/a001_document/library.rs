//! Documents page state: the loaded list and the upload form.

use contracts::domain::a001_document::{Document, DocumentCategory, UploadDocumentRequest};
use contracts::shared::PaginatedResponse;
use thiserror::Error;

/// Extensions the processing backend accepts
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "txt", "docx", "xml"];

pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentLibrary {
    documents: Vec<Document>,
    page: u32,
    total_pages: u32,
    total: u64,
}

impl DocumentLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages.max(1)
    }

    /// Documents on the server, as reported by the last page
    pub fn total(&self) -> u64 {
        self.total.max(self.documents.len() as u64)
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Load a page; documents already shown keep their status unless the
    /// new one is a legal forward move
    pub fn replace_page(&mut self, page: PaginatedResponse<Document>) {
        self.page = page.page;
        self.total_pages = page.total_pages;
        self.total = page.total;
        let mut previous = std::mem::take(&mut self.documents);
        self.documents = page
            .data
            .into_iter()
            .map(|fresh| match previous.iter().position(|d| d.id == fresh.id) {
                Some(pos) => {
                    let mut current = previous.swap_remove(pos);
                    apply_refresh(&mut current, fresh);
                    current
                }
                None => fresh,
            })
            .collect();
    }

    /// Fold refreshed copies into the list; ids no longer shown are ignored
    pub fn merge(&mut self, refreshed: impl IntoIterator<Item = Document>) {
        for fresh in refreshed {
            if let Some(current) = self.documents.iter_mut().find(|d| d.id == fresh.id) {
                apply_refresh(current, fresh);
            }
        }
    }

    /// Freshly uploaded document goes first
    pub fn insert_uploaded(&mut self, doc: Document) {
        self.documents.retain(|d| d.id != doc.id);
        self.documents.insert(0, doc);
        self.total += 1;
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        let removed = self.documents.len() < before;
        if removed {
            self.total = self.total.saturating_sub(1);
        }
        removed
    }

    pub fn count_by_category(&self, category: DocumentCategory) -> usize {
        self.documents.iter().filter(|d| d.category == category).count()
    }

    pub fn total_size(&self) -> u64 {
        self.documents.iter().map(|d| d.file_size).sum()
    }

    /// Documents the backend may still move forward
    pub fn pending_ids(&self) -> Vec<String> {
        self.documents
            .iter()
            .filter(|d| !d.status.is_terminal())
            .map(|d| d.id.clone())
            .collect()
    }

    pub fn processed_count(&self) -> usize {
        self.documents.iter().filter(|d| d.status.is_terminal()).count()
    }
}

fn apply_refresh(current: &mut Document, fresh: Document) {
    let status = fresh.status;
    let kept = current.status;
    *current = Document { status: kept, ..fresh };
    if let Err(e) = current.advance_status(status) {
        log::warn!("{e}");
    }
}

/// File picked in the browser, already read into memory
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadFormError {
    #[error("Selecione um arquivo")]
    NoFile,
    #[error("Arquivo vazio")]
    EmptyFile,
    #[error("Formato não suportado: .{0} (use PDF, TXT, DOCX ou XML)")]
    UnsupportedType(String),
    #[error("Arquivo muito grande (máximo 50 MB)")]
    TooLarge,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    pub file: Option<SelectedFile>,
    pub category: DocumentCategory,
    pub tags: String,
}

impl UploadForm {
    pub fn validate(&self) -> Result<(), UploadFormError> {
        let file = self.file.as_ref().ok_or(UploadFormError::NoFile)?;
        if file.bytes.is_empty() {
            return Err(UploadFormError::EmptyFile);
        }
        let ext = file
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(UploadFormError::UnsupportedType(ext));
        }
        if file.bytes.len() as u64 > MAX_UPLOAD_BYTES {
            return Err(UploadFormError::TooLarge);
        }
        Ok(())
    }

    /// Validated request; the form keeps its file until `reset`
    pub fn to_request(&self) -> Result<UploadDocumentRequest, UploadFormError> {
        self.validate()?;
        let file = self.file.as_ref().ok_or(UploadFormError::NoFile)?;
        let content_type = if file.content_type.is_empty() {
            "application/octet-stream".to_string()
        } else {
            file.content_type.clone()
        };
        Ok(UploadDocumentRequest::new(file.name.clone(), content_type, file.bytes.clone())
            .with_category(self.category)
            .with_tags(&self.tags))
    }

    /// Clears file and tags, keeps the chosen category
    pub fn reset(&mut self) {
        self.file = None;
        self.tags.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use contracts::domain::a001_document::ProcessingStatus;
    use contracts::shared::PageRequest;

    fn doc(id: &str, status: ProcessingStatus, category: DocumentCategory, size: u64) -> Document {
        let at: DateTime<Utc> = "2024-05-01T10:00:00Z".parse().unwrap();
        Document {
            id: id.into(),
            filename: format!("{id}.pdf"),
            file_type: "application/pdf".into(),
            file_size: size,
            content: None,
            category,
            status,
            chunks_count: 0,
            tags: None,
            processing_error: None,
            created_at: at,
            processed_at: None,
        }
    }

    fn page(docs: Vec<Document>) -> PaginatedResponse<Document> {
        PaginatedResponse::from_slice(docs, PageRequest::default())
    }

    #[test]
    fn test_refresh_moves_status_forward() {
        let mut lib = DocumentLibrary::new();
        lib.replace_page(page(vec![doc("a", ProcessingStatus::Pending, DocumentCategory::Legislacao, 10)]));
        lib.merge([doc("a", ProcessingStatus::Processing, DocumentCategory::Legislacao, 10)]);
        assert_eq!(lib.documents()[0].status, ProcessingStatus::Processing);
        lib.merge([
            doc("a", ProcessingStatus::Completed, DocumentCategory::Legislacao, 10),
            doc("gone", ProcessingStatus::Completed, DocumentCategory::Legislacao, 10),
        ]);
        assert_eq!(lib.documents()[0].status, ProcessingStatus::Completed);
        assert_eq!(lib.documents().len(), 1);
    }

    #[test]
    fn test_refresh_never_reverses_status() {
        let mut lib = DocumentLibrary::new();
        lib.replace_page(page(vec![doc("a", ProcessingStatus::Completed, DocumentCategory::Legislacao, 10)]));
        let mut stale = doc("a", ProcessingStatus::Processing, DocumentCategory::Legislacao, 10);
        stale.chunks_count = 12;
        lib.replace_page(page(vec![stale]));
        let a = &lib.documents()[0];
        assert_eq!(a.status, ProcessingStatus::Completed);
        assert_eq!(a.chunks_count, 12);

        lib.merge([doc("a", ProcessingStatus::Failed, DocumentCategory::Legislacao, 10)]);
        assert_eq!(lib.documents()[0].status, ProcessingStatus::Completed);
    }

    #[test]
    fn test_totals_and_category_counts() {
        let mut lib = DocumentLibrary::new();
        lib.replace_page(page(vec![
            doc("a", ProcessingStatus::Completed, DocumentCategory::Legislacao, 1000),
            doc("b", ProcessingStatus::Pending, DocumentCategory::NotasFiscais, 24),
            doc("c", ProcessingStatus::Failed, DocumentCategory::Legislacao, 0),
        ]));
        assert_eq!(lib.count_by_category(DocumentCategory::Legislacao), 2);
        assert_eq!(lib.count_by_category(DocumentCategory::NotasFiscais), 1);
        assert_eq!(lib.total_size(), 1024);
        assert_eq!(lib.processed_count(), 2);
        assert_eq!(lib.total(), 3);
        assert_eq!(lib.pending_ids(), vec!["b".to_string()]);

        assert!(lib.remove("b"));
        assert!(!lib.remove("b"));
        assert_eq!(lib.total(), 2);

        lib.insert_uploaded(doc("d", ProcessingStatus::Completed, DocumentCategory::NotasFiscais, 5));
        assert_eq!(lib.documents()[0].id, "d");
        assert_eq!(lib.total(), 3);
    }

    fn file(name: &str, bytes: usize) -> SelectedFile {
        SelectedFile {
            name: name.into(),
            content_type: String::new(),
            bytes: vec![b'x'; bytes],
        }
    }

    #[test]
    fn test_upload_form_validation() {
        let mut form = UploadForm::default();
        assert_eq!(form.validate(), Err(UploadFormError::NoFile));

        form.file = Some(file("planilha.xlsx", 10));
        assert_eq!(form.validate(), Err(UploadFormError::UnsupportedType("xlsx".into())));

        form.file = Some(file("vazio.pdf", 0));
        assert_eq!(form.validate(), Err(UploadFormError::EmptyFile));

        form.file = Some(file("Lei.PDF", 10));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_upload_form_builds_request() {
        let form = UploadForm {
            file: Some(file("convenio.xml", 3)),
            category: DocumentCategory::NotasFiscais,
            tags: " icms, fiscal ,".into(),
        };
        let req = form.to_request().unwrap();
        assert_eq!(req.filename, "convenio.xml");
        assert_eq!(req.content_type, "application/octet-stream");
        assert_eq!(req.category, DocumentCategory::NotasFiscais);
        assert_eq!(req.tags, "icms,fiscal");

        let mut form = form;
        form.reset();
        assert!(form.file.is_none());
        assert!(form.tags.is_empty());
        assert_eq!(form.category, DocumentCategory::NotasFiscais);
    }
}
