use super::aggregate::{Document, DocumentCategory, ProcessingStatus};
use crate::shared::timestamp::parse_optional_field;
use crate::shared::ContractError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Multipart upload for `POST /documents/upload`.
///
/// Form fields: `file` (the bytes, with `filename`), `category`, `tags`.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadDocumentRequest {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub category: DocumentCategory,
    pub tags: String,
}

impl UploadDocumentRequest {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
            category: DocumentCategory::default(),
            tags: String::new(),
        }
    }

    pub fn with_category(mut self, category: DocumentCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_tags(mut self, tags: &str) -> Self {
        self.tags = normalize_tags(tags);
        self
    }

    /// Everything but the bytes, kept while the upload is in flight
    pub fn describe(&self) -> UploadedFile {
        UploadedFile {
            filename: self.filename.clone(),
            content_type: self.content_type.clone(),
            file_size: self.bytes.len() as u64,
            category: self.category,
            tags: self.tags.clone(),
        }
    }

    /// Text fields sent alongside the file part
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("category".to_string(), self.category.as_str().to_string()),
            ("tags".to_string(), self.tags.clone()),
        ]
    }
}

/// "icms, fiscal ,," -> "icms,fiscal"
pub fn normalize_tags(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Partial document returned once the upload has been processed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadDocumentResponse {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub status: ProcessingStatus,
    #[serde(default)]
    pub chunks_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<String>,
}

/// Metadata of a file that was sent for upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub file_size: u64,
    pub category: DocumentCategory,
    pub tags: String,
}

impl UploadDocumentResponse {
    /// Document as far as the upload response and the sent file tell
    pub fn into_document(self, file: UploadedFile, received_at: DateTime<Utc>) -> Result<Document, ContractError> {
        Ok(Document {
            processed_at: parse_optional_field("processed_at", self.processed_at.as_deref())?,
            id: self.id,
            filename: self.filename,
            file_type: file.content_type,
            file_size: file.file_size,
            content: None,
            category: file.category,
            status: self.status,
            chunks_count: self.chunks_count,
            tags: (!file.tags.is_empty()).then_some(file.tags),
            processing_error: None,
            created_at: received_at,
        })
    }
}
