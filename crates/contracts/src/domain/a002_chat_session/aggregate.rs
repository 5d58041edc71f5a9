use crate::shared::error::ContractError;
use crate::shared::timestamp::{format_optional, format_timestamp, parse_field, parse_optional_field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form session metadata; known counters are typed, the rest is kept as-is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: String,
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SessionMetadata>,
}

/// Chat session with native timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_activity: Option<DateTime<Utc>>,
    pub metadata: Option<SessionMetadata>,
}

impl ChatSession {
    /// Session that exists only on this client (offline placeholder)
    pub fn local(id: impl Into<String>, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: Some(title.into()),
            description: None,
            user_id: None,
            created_at: now,
            updated_at: now,
            last_activity: None,
            metadata: None,
        }
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => "Sessão sem título",
        }
    }

    /// `updated_at` never moves backwards
    pub fn touch(&mut self, at: DateTime<Utc>) {
        if at > self.updated_at {
            self.updated_at = at;
        }
        self.last_activity = Some(self.last_activity.map_or(at, |prev| prev.max(at)));
    }

    /// Bookkeeping for an appended message
    pub fn record_message(&mut self, at: DateTime<Utc>) {
        self.touch(at);
        let meta = self.metadata.get_or_insert_with(SessionMetadata::default);
        meta.message_count = Some(meta.message_count.unwrap_or(0) + 1);
    }

    pub fn message_count(&self) -> u32 {
        self.metadata
            .as_ref()
            .and_then(|m| m.message_count)
            .unwrap_or(0)
    }
}

impl TryFrom<SessionResponse> for ChatSession {
    type Error = ContractError;

    fn try_from(r: SessionResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: parse_field("created_at", &r.created_at)?,
            updated_at: parse_field("updated_at", &r.updated_at)?,
            last_activity: parse_optional_field("last_activity", r.last_activity.as_deref())?,
            id: r.id,
            title: r.title,
            description: r.description,
            user_id: r.user_id,
            metadata: r.metadata,
        })
    }
}

impl From<&ChatSession> for SessionResponse {
    fn from(s: &ChatSession) -> Self {
        Self {
            id: s.id.clone(),
            title: s.title.clone(),
            description: s.description.clone(),
            user_id: s.user_id.clone(),
            created_at: format_timestamp(&s.created_at),
            updated_at: format_timestamp(&s.updated_at),
            last_activity: format_optional(s.last_activity.as_ref()),
            metadata: s.metadata.clone(),
        }
    }
}

/// `POST /sessions` body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SessionMetadata>,
}

impl CreateSessionRequest {
    pub fn titled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Informe um nome para a sessão".into());
        }
        if self.name.chars().count() > 255 {
            return Err("O nome da sessão deve ter no máximo 255 caracteres".into());
        }
        Ok(())
    }
}

/// `PUT /sessions/{id}` body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSessionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SessionMetadata>,
}

/// Optional filters for `GET /sessions`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}
