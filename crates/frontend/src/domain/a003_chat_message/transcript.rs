//! Chat transcript state: optimistic append, then answer or visible error.
//!
//! A failed send keeps the user's message and appends an error entry
//! after it; nothing is rolled back.

use crate::shared::api::ApiError;
use chrono::{DateTime, Utc};
use contracts::domain::a003_chat_message::{ChatExchange, ChatMessage, MessageRole};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    Message(ChatMessage),
    Error {
        id: String,
        text: String,
        at: DateTime<Utc>,
    },
}

impl TranscriptEntry {
    pub fn key(&self) -> String {
        match self {
            TranscriptEntry::Message(m) => m.id.clone(),
            TranscriptEntry::Error { id, .. } => id.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TranscriptEntry::Error { .. })
    }

    pub fn role(&self) -> MessageRole {
        match self {
            TranscriptEntry::Message(m) => m.role,
            TranscriptEntry::Error { .. } => MessageRole::System,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            TranscriptEntry::Message(m) => &m.content,
            TranscriptEntry::Error { text, .. } => text,
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            TranscriptEntry::Message(m) => m.created_at,
            TranscriptEntry::Error { at, .. } => *at,
        }
    }
}

/// Handle for the one send in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    seq: u64,
    pub session_id: String,
    pub question: String,
    user_entry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendRejected {
    #[error("Selecione ou crie uma sessão primeiro")]
    NoSession,
    #[error("Digite uma pergunta")]
    EmptyQuestion,
    #[error("Aguarde a resposta anterior")]
    Busy,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    session_id: Option<String>,
    entries: Vec<TranscriptEntry>,
    pending: Option<PendingSend>,
    next_seq: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.pending.is_some()
    }

    /// Switch to `session_id` with its persisted history, in creation order.
    /// A send still in flight for the previous session becomes stale.
    pub fn replace_history(&mut self, session_id: &str, mut messages: Vec<ChatMessage>) {
        ChatMessage::sort_by_creation(&mut messages);
        self.session_id = Some(session_id.to_string());
        self.entries = messages.into_iter().map(TranscriptEntry::Message).collect();
        self.pending = None;
    }

    pub fn clear(&mut self) {
        self.session_id = None;
        self.entries.clear();
        self.pending = None;
    }

    /// Show the user's question immediately and hand back the send handle
    pub fn optimistic_append(&mut self, text: &str, now: DateTime<Utc>) -> Result<PendingSend, SendRejected> {
        let session_id = self.session_id.clone().ok_or(SendRejected::NoSession)?;
        let question = text.trim();
        if question.is_empty() {
            return Err(SendRejected::EmptyQuestion);
        }
        if self.pending.is_some() {
            return Err(SendRejected::Busy);
        }

        let message = ChatMessage::user(&session_id, question, now);
        self.next_seq += 1;
        let pending = PendingSend {
            seq: self.next_seq,
            session_id,
            question: question.to_string(),
            user_entry: message.id.clone(),
        };
        self.entries.push(TranscriptEntry::Message(message));
        self.pending = Some(pending.clone());
        Ok(pending)
    }

    /// Apply the outcome of `pending`. Returns false when it was stale or
    /// cancelled and nothing changed.
    pub fn resolve(
        &mut self,
        pending: &PendingSend,
        outcome: Result<ChatExchange, ApiError>,
        now: DateTime<Utc>,
    ) -> bool {
        if self.pending.as_ref() != Some(pending) {
            log::debug!("ignoring stale chat response #{}", pending.seq);
            return false;
        }
        self.pending = None;

        match outcome {
            Ok(exchange) => {
                if let Some(persisted) = exchange.user {
                    if let Some(entry) = self.entries.iter_mut().find(|e| e.key() == pending.user_entry) {
                        *entry = TranscriptEntry::Message(persisted);
                    }
                }
                self.entries.push(TranscriptEntry::Message(exchange.assistant));
                true
            }
            Err(ApiError::Cancelled) => false,
            Err(e) => {
                log::warn!("chat send failed: {e}");
                self.entries.push(TranscriptEntry::Error {
                    id: format!("error-{}", pending.seq),
                    text: e.user_message(),
                    at: now,
                });
                true
            }
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter().filter_map(|e| match e {
            TranscriptEntry::Message(m) => Some(m),
            TranscriptEntry::Error { .. } => None,
        })
    }
}
