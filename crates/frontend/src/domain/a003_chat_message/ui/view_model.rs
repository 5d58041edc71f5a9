//! Chat page - View Model

use super::model;
use crate::domain::a003_chat_message::Transcript;
use crate::shared::api::RequestScope;
use crate::shared::fallback::Recovered;
use crate::shared::page_state::LoadState;
use crate::shared::services::Services;
use chrono::Utc;
use contracts::domain::a002_chat_session::{ChatSession, CreateSessionRequest};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ChatPageVm {
    pub sessions: RwSignal<Vec<ChatSession>>,
    pub active_session: RwSignal<Option<String>>,
    pub transcript: RwSignal<Transcript>,
    pub draft: RwSignal<String>,
    pub sessions_state: RwSignal<LoadState>,
    pub transcript_state: RwSignal<LoadState>,
    /// Set once any list on the page was filled from local fixtures
    pub degraded: RwSignal<bool>,
    pub notice: RwSignal<Option<String>>,
    services: StoredValue<Services>,
    page: StoredValue<RequestScope>,
    sessions_req: StoredValue<RequestScope>,
    transcript_req: StoredValue<RequestScope>,
}

impl ChatPageVm {
    pub fn new(services: Services) -> Self {
        let page = RequestScope::new();
        Self {
            sessions: RwSignal::new(Vec::new()),
            active_session: RwSignal::new(None),
            transcript: RwSignal::new(Transcript::new()),
            draft: RwSignal::new(String::new()),
            sessions_state: RwSignal::new(LoadState::default()),
            transcript_state: RwSignal::new(LoadState::Ready),
            degraded: RwSignal::new(false),
            notice: RwSignal::new(None),
            services: StoredValue::new(services),
            sessions_req: StoredValue::new(page.child()),
            transcript_req: StoredValue::new(page.child()),
            page: StoredValue::new(page),
        }
    }

    /// Scope shared by every request the page starts; cancel it on unmount
    pub fn scope(&self) -> RequestScope {
        self.page.get_value()
    }

    pub fn is_sending(&self) -> impl Fn() -> bool + Copy + 'static {
        let transcript = self.transcript;
        move || transcript.with(Transcript::is_awaiting_response)
    }

    pub fn active_title(&self) -> impl Fn() -> Option<String> + Copy + 'static {
        let sessions = self.sessions;
        let active = self.active_session;
        move || {
            let id = active.get()?;
            sessions.with(|list| {
                list.iter()
                    .find(|s| s.id == id)
                    .map(|s| s.display_title().to_string())
            })
        }
    }

    pub fn load_sessions(&self) {
        let vm = *self;
        let services = self.services.get_value();
        let scope = self.sessions_req.get_value();
        let ticket = scope.begin();
        self.sessions_state.update(|s| s.begin_load());

        wasm_bindgen_futures::spawn_local(async move {
            let result = model::fetch_sessions(&services, &scope.token()).await;
            if !scope.should_commit(ticket) {
                return;
            }
            match result {
                Ok(Recovered { value, degraded }) => {
                    vm.degraded.update(|d| *d |= degraded);
                    let first = value.first().map(|s| s.id.clone());
                    vm.sessions.set(value);
                    vm.sessions_state.update(|s| s.finish_load(Ok::<(), String>(())));
                    if vm.active_session.get_untracked().is_none() {
                        if let Some(id) = first {
                            vm.open_session(id);
                        }
                    }
                }
                Err(e) => {
                    log::error!("falha ao carregar sessões: {e}");
                    vm.sessions_state.update(|s| s.finish_load(Err(e.user_message())));
                }
            }
        });
    }

    pub fn open_session(&self, id: String) {
        if self.active_session.get_untracked().as_deref() == Some(id.as_str()) {
            return;
        }
        let vm = *self;
        let services = self.services.get_value();
        let scope = self.transcript_req.get_value();
        let ticket = scope.begin();

        self.active_session.set(Some(id.clone()));
        self.transcript.update(|t| t.replace_history(&id, Vec::new()));
        self.transcript_state.update(|s| s.begin_load());
        self.notice.set(None);

        wasm_bindgen_futures::spawn_local(async move {
            let result = model::fetch_transcript(&services, &id, &scope.token()).await;
            if !scope.should_commit(ticket) {
                return;
            }
            match result {
                Ok(Recovered { value, degraded }) => {
                    vm.degraded.update(|d| *d |= degraded);
                    vm.transcript.update(|t| t.replace_history(&id, value));
                    vm.transcript_state.update(|s| s.finish_load(Ok::<(), String>(())));
                }
                Err(e) => {
                    log::error!("falha ao carregar mensagens de {id}: {e}");
                    vm.transcript_state.update(|s| s.finish_load(Err(e.user_message())));
                }
            }
        });
    }

    /// Creates a session; `then_ask` is sent as its first question
    pub fn create_session(&self, name: String, then_ask: Option<String>) {
        let request = CreateSessionRequest::titled(name.trim());
        if let Err(message) = request.validate() {
            self.notice.set(Some(message));
            return;
        }
        if self.sessions_state.with_untracked(LoadState::is_submitting) {
            return;
        }
        // supersedes a list load still in flight, which would drop the new session
        self.sessions_req.with_value(|s| {
            s.begin();
        });
        self.sessions_state.update(|s| {
            if s.is_loading() {
                s.finish_load(Ok::<(), String>(()));
            }
            s.begin_submit();
        });

        let vm = *self;
        let services = self.services.get_value();
        let token = self.page.get_value().token();

        wasm_bindgen_futures::spawn_local(async move {
            let result = model::create_session(&services, &request, &token).await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(Recovered { value, degraded }) => {
                    vm.degraded.update(|d| *d |= degraded);
                    let id = value.id.clone();
                    log::info!("sessão criada: {id}");
                    vm.sessions.update(|list| list.insert(0, value));
                    vm.sessions_state.update(|s| s.finish_submit(Ok::<(), String>(())));
                    vm.open_empty(id);
                    if let Some(question) = then_ask {
                        vm.submit(question);
                    }
                }
                Err(e) => {
                    log::warn!("falha ao criar sessão: {e}");
                    vm.sessions_state.update(|s| s.finish_submit(Err(e.user_message())));
                    vm.notice.set(Some(e.user_message()));
                }
            }
        });
    }

    pub fn delete_session(&self, id: String) {
        let vm = *self;
        let services = self.services.get_value();
        let token = self.page.get_value().token();

        wasm_bindgen_futures::spawn_local(async move {
            let result = model::delete_session(&services, &id, &token).await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(()) => {
                    vm.sessions.update(|list| list.retain(|s| s.id != id));
                    if vm.active_session.get_untracked().as_deref() == Some(id.as_str()) {
                        vm.active_session.set(None);
                        vm.transcript.update(Transcript::clear);
                    }
                }
                Err(e) => {
                    log::warn!("falha ao excluir sessão {id}: {e}");
                    vm.notice.set(Some(e.user_message()));
                }
            }
        });
    }

    /// Send the draft (or a suggestion), opening a session first when none is active
    pub fn send(&self, text: String) {
        let question = text.trim().to_string();
        if question.is_empty() {
            return;
        }
        if self.active_session.get_untracked().is_some() {
            self.submit(question);
        } else {
            let title = model::title_from_question(&question);
            self.create_session(title, Some(question));
        }
    }

    fn open_empty(&self, id: String) {
        self.transcript_req.with_value(|s| {
            s.begin();
        });
        self.transcript.update(|t| t.replace_history(&id, Vec::new()));
        self.transcript_state.update(|s| s.finish_load(Ok::<(), String>(())));
        self.active_session.set(Some(id));
    }

    fn submit(&self, question: String) {
        let appended = self
            .transcript
            .try_update(|t| t.optimistic_append(&question, Utc::now()));
        let pending = match appended {
            Some(Ok(pending)) => pending,
            Some(Err(rejected)) => {
                self.notice.set(Some(rejected.to_string()));
                return;
            }
            None => return,
        };
        self.draft.set(String::new());
        self.notice.set(None);

        let vm = *self;
        let services = self.services.get_value();
        let token = self.page.get_value().token();

        wasm_bindgen_futures::spawn_local(async move {
            let result = model::ask(&services, &pending, &token).await;
            if token.is_cancelled() {
                return;
            }
            if let Err(e) = &result {
                log::error!("falha ao enviar pergunta: {e}");
            }
            let now = Utc::now();
            let applied = vm
                .transcript
                .try_update(|t| t.resolve(&pending, result, now))
                .unwrap_or(false);
            if applied {
                vm.sessions.update(|list| {
                    if let Some(session) = list.iter_mut().find(|s| s.id == pending.session_id) {
                        session.record_message(now);
                    }
                });
            }
        });
    }
}
