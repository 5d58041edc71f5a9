//! Chat page - Model (service calls)

use crate::shared::api::{ApiError, CancelToken};
use crate::shared::fallback::{recover, Recovered};
use crate::shared::services::Services;
use crate::domain::a003_chat_message::PendingSend;
use chrono::Utc;
use contracts::domain::a002_chat_session::{ChatSession, CreateSessionRequest, SessionFilter};
use contracts::domain::a003_chat_message::{AskParams, ChatExchange, ChatMessage};
use contracts::shared::PageRequest;

/// Longest session title derived from a first question
const DERIVED_TITLE_CHARS: usize = 48;

pub async fn fetch_sessions(
    services: &Services,
    cancel: &CancelToken,
) -> Result<Recovered<Vec<ChatSession>>, ApiError> {
    let page = PageRequest::first(services.config.api.page_size);
    let result = services
        .sessions
        .list(page, &SessionFilter::default(), cancel)
        .await
        .map(|p| p.data);
    recover(result, || services.fallback.sessions(Utc::now()))
}

pub async fn fetch_transcript(
    services: &Services,
    session_id: &str,
    cancel: &CancelToken,
) -> Result<Recovered<Vec<ChatMessage>>, ApiError> {
    let result = fetch_history(services, session_id, cancel).await;
    recover(result, || services.fallback.transcript(session_id, Utc::now()))
}

/// Every persisted message of a session, following pages until the last one
async fn fetch_history(
    services: &Services,
    session_id: &str,
    cancel: &CancelToken,
) -> Result<Vec<ChatMessage>, ApiError> {
    let mut request = PageRequest::first(services.config.api.page_size);
    let mut messages = Vec::new();
    loop {
        let page = services.chats.list_by_session(session_id, request, cancel).await?;
        let next = page.next_page();
        let exhausted = page.data.is_empty();
        messages.extend(page.data);
        match next {
            Some(following) if !exhausted => request = following,
            _ => break,
        }
    }
    ChatMessage::sort_by_creation(&mut messages);
    Ok(messages)
}

pub async fn create_session(
    services: &Services,
    request: &CreateSessionRequest,
    cancel: &CancelToken,
) -> Result<Recovered<ChatSession>, ApiError> {
    let result = services.sessions.create(request, cancel).await;
    recover(result, || services.fallback.created_session(request, Utc::now()))
}

pub async fn delete_session(services: &Services, id: &str, cancel: &CancelToken) -> Result<(), ApiError> {
    services.sessions.delete(id, cancel).await
}

pub async fn ask(
    services: &Services,
    pending: &PendingSend,
    cancel: &CancelToken,
) -> Result<ChatExchange, ApiError> {
    let params = AskParams::new(pending.session_id.as_str(), pending.question.as_str())
        .with_k(services.config.api.chat_top_k);
    services.chats.ask(&params, cancel).await
}

/// Session name for a question asked before any session was opened
pub fn title_from_question(question: &str) -> String {
    let trimmed = question.trim();
    if trimmed.chars().count() <= DERIVED_TITLE_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(DERIVED_TITLE_CHARS).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::mock::{FakeBackend, BASE};
    use crate::shared::api::ApiClient;
    use crate::shared::config::{AppConfig, EnvOverrides};
    use crate::domain::a003_chat_message::Transcript;
    use contracts::domain::a003_chat_message::MessageRole;
    use futures::executor::block_on;

    fn services(backend: &FakeBackend, mode: &str) -> Services {
        paged_services(backend, mode, 100)
    }

    fn paged_services(backend: &FakeBackend, mode: &str, page_size: u32) -> Services {
        let source = format!("[api]\nbase_url = \"http://localhost:8000/api/v1\"\npage_size = {page_size}\n");
        let config = AppConfig::parse(&source)
            .unwrap()
            .apply(EnvOverrides {
                fallback_mode: Some(mode),
                ..Default::default()
            })
            .unwrap();
        Services::new(config, ApiClient::new(BASE, backend.transport().shared()))
    }

    #[test]
    fn test_title_from_question() {
        assert_eq!(title_from_question("  Como calcular ICMS?  "), "Como calcular ICMS?");
        let long = "Quais são as deduções permitidas na declaração de IRPF para dependentes?";
        let title = title_from_question(long);
        assert!(title.ends_with('…'));
        assert!(title.chars().count() <= DERIVED_TITLE_CHARS + 1);
    }

    #[test]
    fn test_ask_uses_configured_top_k() {
        let backend = FakeBackend::new();
        let session = backend.seed_session("ICMS");
        let services = services(&backend, "live");
        let mut transcript = Transcript::new();
        transcript.replace_history(&session, Vec::new());
        let pending = transcript.optimistic_append("Como calcular ICMS?", Utc::now()).unwrap();

        let exchange = block_on(ask(&services, &pending, &CancelToken::new())).unwrap();

        assert_eq!(exchange.assistant.session_id, session);
    }

    #[test]
    fn test_validation_error_is_not_replaced_by_fixture() {
        let backend = FakeBackend::new();
        let services = services(&backend, "fixtures");
        let request = CreateSessionRequest::titled("   ");

        let err = block_on(create_session(&services, &request, &CancelToken::new())).unwrap_err();

        assert!(err.is_invalid());
    }

    #[test]
    fn test_sessions_load_from_backend() {
        let backend = FakeBackend::new();
        let id = backend.seed_session("Simples Nacional");
        let loaded = block_on(fetch_sessions(&services(&backend, "live"), &CancelToken::new())).unwrap();

        assert!(!loaded.degraded);
        assert_eq!(loaded.value.len(), 1);
        assert_eq!(loaded.value[0].id, id);
    }

    #[test]
    fn test_offline_sessions_in_fixtures_mode_are_degraded() {
        let backend = FakeBackend::new();
        backend.set_offline(true);
        let loaded = block_on(fetch_sessions(&services(&backend, "fixtures"), &CancelToken::new())).unwrap();

        assert!(loaded.degraded);
        assert!(!loaded.value.is_empty());
    }

    #[test]
    fn test_transcript_after_ask_lists_question_then_answer() {
        let backend = FakeBackend::new();
        let session = backend.seed_session("ICMS");
        let services = services(&backend, "live");
        let mut transcript = Transcript::new();
        transcript.replace_history(&session, Vec::new());
        let pending = transcript.optimistic_append("Como calcular ICMS?", Utc::now()).unwrap();
        block_on(ask(&services, &pending, &CancelToken::new())).unwrap();

        let loaded = block_on(fetch_transcript(&services, &session, &CancelToken::new())).unwrap();

        assert!(!loaded.degraded);
        let roles: Vec<_> = loaded.value.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant]);
        assert_eq!(loaded.value[0].content, "Como calcular ICMS?");
    }

    #[test]
    fn test_transcript_follows_every_page() {
        let backend = FakeBackend::new();
        let session = backend.seed_session("IPI");
        let services = paged_services(&backend, "live", 1);
        for question in ["O que é IPI?", "Quem paga IPI?"] {
            let mut transcript = Transcript::new();
            transcript.replace_history(&session, Vec::new());
            let pending = transcript.optimistic_append(question, Utc::now()).unwrap();
            block_on(ask(&services, &pending, &CancelToken::new())).unwrap();
        }

        let loaded = block_on(fetch_transcript(&services, &session, &CancelToken::new())).unwrap();

        assert_eq!(loaded.value.len(), 4);
        assert_eq!(loaded.value[0].content, "O que é IPI?");
    }

    #[test]
    fn test_offline_transcript_in_fixtures_mode_is_degraded() {
        let backend = FakeBackend::new();
        backend.set_offline(true);
        let loaded = block_on(fetch_transcript(&services(&backend, "fixtures"), "s1", &CancelToken::new())).unwrap();

        assert!(loaded.degraded);
        assert!(!loaded.value.is_empty());
    }

    #[test]
    fn test_offline_create_falls_back_to_local_session() {
        let backend = FakeBackend::new();
        backend.set_offline(true);
        let services = services(&backend, "fixtures");
        let request = CreateSessionRequest::titled("ICMS test");

        let created = block_on(create_session(&services, &request, &CancelToken::new())).unwrap();

        assert!(created.degraded);
        assert_eq!(created.value.display_title(), "ICMS test");
    }

    #[test]
    fn test_offline_transcript_in_live_mode_is_an_error() {
        let backend = FakeBackend::new();
        backend.set_offline(true);
        let services = services(&backend, "live");

        let err = block_on(fetch_transcript(&services, "s1", &CancelToken::new())).unwrap_err();

        assert!(err.is_network());
    }
}
