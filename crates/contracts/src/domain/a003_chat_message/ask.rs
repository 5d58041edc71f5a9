//! Question/answer exchange: `POST /chats?session_id=..&question=..&k=..`

use super::aggregate::{ChatMessage, ChatMessageResponse, Citation, MessageMetadata, SourceCitation};
use crate::shared::error::ContractError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chunks retrieved per question unless configured otherwise
pub const DEFAULT_TOP_K: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskParams {
    pub session_id: String,
    pub question: String,
    pub k: u32,
}

impl AskParams {
    pub fn new(session_id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            question: question.into(),
            k: DEFAULT_TOP_K,
        }
    }

    pub fn with_k(mut self, k: u32) -> Self {
        self.k = k.max(1);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CitedExcerpt {
    #[serde(default)]
    pub citation_number: u32,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub relevance_score: f64,
}

/// Answer payload produced by the retrieval pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<SourceCitation>,
    #[serde(default)]
    pub chunks_used: u32,
    #[serde(default)]
    pub cited_excerpts: Vec<CitedExcerpt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<f64>,
    /// Persisted copies, when the backend stores the exchange itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_message: Option<ChatMessageResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assistant_message: Option<ChatMessageResponse>,
}

/// Result of one question: the persisted user message (if returned) and the answer
#[derive(Debug, Clone, PartialEq)]
pub struct ChatExchange {
    pub user: Option<ChatMessage>,
    pub assistant: ChatMessage,
}

impl AskResponse {
    fn metadata(&self) -> MessageMetadata {
        MessageMetadata {
            sources: self.sources.iter().cloned().map(Citation::Detailed).collect(),
            confidence: self.confidence,
            processing_time: self.processing_time,
        }
    }

    /// Build the exchange; the answer is synthesised locally at `now`
    /// when the backend did not return a persisted assistant message.
    pub fn into_exchange(self, session_id: &str, now: DateTime<Utc>) -> Result<ChatExchange, ContractError> {
        let metadata = self.metadata();
        let user = self.user_message.map(ChatMessage::try_from).transpose()?;
        let assistant = match self.assistant_message {
            Some(persisted) => {
                let mut msg = ChatMessage::try_from(persisted)?;
                if msg.metadata.is_none() {
                    msg = msg.with_metadata(metadata);
                }
                msg
            }
            None => ChatMessage::assistant(session_id, self.answer, now).with_metadata(metadata),
        };
        Ok(ChatExchange { user, assistant })
    }
}
