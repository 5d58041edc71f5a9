use crate::shared::error::ContractError;
use crate::shared::timestamp::{format_timestamp, parse_field, parse_optional_field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MessageRole::User => "Você",
            MessageRole::Assistant => "Assistente ACFI",
            MessageRole::System => "Sistema",
        }
    }
}

/// Source chunk an answer was grounded on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceCitation {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub content_preview: String,
    #[serde(default)]
    pub relevance_score: f64,
}

/// A citation is either a bare label or a detailed source reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Citation {
    Label(String),
    Detailed(SourceCitation),
}

impl Citation {
    pub fn label(&self) -> String {
        match self {
            Citation::Label(label) => label.clone(),
            Citation::Detailed(source) if source.number > 0 => {
                format!("[{}] {}", source.number, source.filename)
            }
            Citation::Detailed(source) => source.filename.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Citation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Seconds spent producing the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
}

impl MessageMetadata {
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty() && self.confidence.is_none() && self.processing_time.is_none()
    }

    /// "87.5%" style confidence
    pub fn confidence_percent(&self) -> Option<String> {
        self.confidence.map(|c| format!("{:.1}%", c * 100.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    pub id: String,
    pub session_id: String,
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Chat message with native timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub session_id: String,
    pub role: MessageRole,
    pub content: String,
    pub metadata: Option<MessageMetadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(
        session_id: impl Into<String>,
        role: MessageRole,
        content: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            role,
            content: content.into(),
            metadata: None,
            created_at: at,
            updated_at: at,
        }
    }

    pub fn user(session_id: impl Into<String>, content: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(session_id, MessageRole::User, content, at)
    }

    pub fn assistant(
        session_id: impl Into<String>,
        content: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self::new(session_id, MessageRole::Assistant, content, at)
    }

    pub fn with_metadata(mut self, metadata: MessageMetadata) -> Self {
        self.metadata = (!metadata.is_empty()).then_some(metadata);
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    /// Stable transcript order: creation time, then id
    pub fn sort_by_creation(messages: &mut [ChatMessage]) {
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    }
}

impl TryFrom<ChatMessageResponse> for ChatMessage {
    type Error = ContractError;

    fn try_from(r: ChatMessageResponse) -> Result<Self, Self::Error> {
        let created_at = parse_field("created_at", &r.created_at)?;
        let updated_at = parse_optional_field("updated_at", r.updated_at.as_deref())?.unwrap_or(created_at);
        Ok(Self {
            id: r.id,
            session_id: r.session_id,
            role: r.role,
            content: r.content,
            metadata: r.metadata,
            created_at,
            updated_at,
        })
    }
}

impl From<&ChatMessage> for ChatMessageResponse {
    fn from(m: &ChatMessage) -> Self {
        Self {
            id: m.id.clone(),
            session_id: m.session_id.clone(),
            role: m.role,
            content: m.content.clone(),
            metadata: m.metadata.clone(),
            created_at: format_timestamp(&m.created_at),
            updated_at: Some(format_timestamp(&m.updated_at)),
        }
    }
}

/// `PUT /chats/{id}` body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateChatMessageRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
