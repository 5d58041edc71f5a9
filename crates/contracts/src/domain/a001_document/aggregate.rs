use crate::shared::error::ContractError;
use crate::shared::timestamp::{format_optional, format_timestamp, parse_field, parse_optional_field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Knowledge-base bucket a document is filed under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    #[default]
    Legislacao,
    NotasFiscais,
}

impl DocumentCategory {
    pub fn all() -> [DocumentCategory; 2] {
        [DocumentCategory::Legislacao, DocumentCategory::NotasFiscais]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Legislacao => "legislacao",
            DocumentCategory::NotasFiscais => "notas_fiscais",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentCategory::Legislacao => "Legislação",
            DocumentCategory::NotasFiscais => "Notas Fiscais",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DocumentCategory::Legislacao => "⚖️",
            DocumentCategory::NotasFiscais => "🧾",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, ContractError> {
        match s {
            "legislacao" => Ok(DocumentCategory::Legislacao),
            "notas_fiscais" => Ok(DocumentCategory::NotasFiscais),
            _ => Err(ContractError::UnknownVariant {
                kind: "document category",
                value: s.to_string(),
            }),
        }
    }
}

/// Processing pipeline state.
///
/// Moves forward only: pending -> processing -> completed | failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    #[serde(rename = "error", alias = "failed")]
    Failed,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Pending => "pending",
            ProcessingStatus::Processing => "processing",
            ProcessingStatus::Completed => "completed",
            ProcessingStatus::Failed => "error",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProcessingStatus::Pending => "Pendente",
            ProcessingStatus::Processing => "Processando",
            ProcessingStatus::Completed => "Concluído",
            ProcessingStatus::Failed => "Erro",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessingStatus::Completed | ProcessingStatus::Failed)
    }

    fn rank(&self) -> u8 {
        match self {
            ProcessingStatus::Pending => 0,
            ProcessingStatus::Processing => 1,
            ProcessingStatus::Completed | ProcessingStatus::Failed => 2,
        }
    }

    /// Whether `next` may follow `self`. Staying put is allowed; a poll may
    /// skip the processing step, but a terminal state never changes.
    pub fn can_transition_to(&self, next: ProcessingStatus) -> bool {
        if *self == next {
            return true;
        }
        !self.is_terminal() && next.rank() > self.rank()
    }
}

/// Document as exchanged with the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: String,
    pub filename: String,
    #[serde(default, alias = "content_type")]
    pub file_type: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub category: DocumentCategory,
    #[serde(default, alias = "processing_status")]
    pub status: ProcessingStatus,
    #[serde(default, alias = "chunk_count")]
    pub chunks_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_error: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<String>,
}

/// Document with native timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub file_type: String,
    pub file_size: u64,
    pub content: Option<String>,
    pub category: DocumentCategory,
    pub status: ProcessingStatus,
    pub chunks_count: u32,
    pub tags: Option<String>,
    pub processing_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Apply a status observed later; regressions are rejected
    pub fn advance_status(&mut self, next: ProcessingStatus) -> Result<(), String> {
        if !self.status.can_transition_to(next) {
            return Err(format!(
                "documento {}: transição inválida {} -> {}",
                self.id,
                self.status.as_str(),
                next.as_str()
            ));
        }
        self.status = next;
        Ok(())
    }

    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|t| t.split(',').map(str::trim).filter(|t| !t.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Lowercase extension, falling back to the declared file type
    pub fn extension(&self) -> String {
        match self.filename.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
            _ => self.file_type.to_lowercase(),
        }
    }
}

impl TryFrom<DocumentResponse> for Document {
    type Error = ContractError;

    fn try_from(r: DocumentResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: parse_field("created_at", &r.created_at)?,
            processed_at: parse_optional_field("processed_at", r.processed_at.as_deref())?,
            id: r.id,
            filename: r.filename,
            file_type: r.file_type,
            file_size: r.file_size,
            content: r.content,
            category: r.category,
            status: r.status,
            chunks_count: r.chunks_count,
            tags: r.tags,
            processing_error: r.processing_error,
        })
    }
}

impl From<&Document> for DocumentResponse {
    fn from(d: &Document) -> Self {
        Self {
            id: d.id.clone(),
            filename: d.filename.clone(),
            file_type: d.file_type.clone(),
            file_size: d.file_size,
            content: d.content.clone(),
            category: d.category,
            status: d.status,
            chunks_count: d.chunks_count,
            tags: d.tags.clone(),
            processing_error: d.processing_error.clone(),
            created_at: format_timestamp(&d.created_at),
            processed_at: format_optional(d.processed_at.as_ref()),
        }
    }
}

/// `POST /documents` body (metadata-only registration)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    pub filename: String,
    pub file_type: String,
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub category: DocumentCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

/// `PUT /documents/{id}` body; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDocumentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<DocumentCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProcessingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_error: Option<String>,
}

/// `GET /documents/vector/info`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorStoreInfo {
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    #[serde(default, alias = "count", skip_serializing_if = "Option::is_none")]
    pub document_count: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
