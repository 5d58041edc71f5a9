//! Chat page - View Component

use super::message_bubble::{MessageBubble, TypingIndicator};
use super::suggestions::SuggestionsSidebar;
use super::view_model::ChatPageVm;
use crate::domain::a002_chat_session::ui::{NewSessionForm, SessionList};
use crate::shared::components::{DegradedBanner, ErrorBanner};
use crate::shared::icons::icon;
use crate::shared::services::use_services;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn ChatPage() -> impl IntoView {
    let vm = ChatPageVm::new(use_services());
    let scope = vm.scope();
    on_cleanup(move || scope.cancel());

    let messages_ref = NodeRef::<leptos::html::Div>::new();
    let is_sending = vm.is_sending();
    let active_title = vm.active_title();

    vm.load_sessions();

    // keep the newest entry in view
    Effect::new(move |_| {
        let _ = vm.transcript.with(|t| t.entries().len());
        if let Some(container) = messages_ref.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    let on_select = Callback::new(move |id: String| vm.open_session(id));
    let on_delete = Callback::new(move |id: String| vm.delete_session(id));
    let on_create = Callback::new(move |name: String| vm.create_session(name, None));
    let on_pick = Callback::new(move |question: String| vm.send(question));
    let send_draft = move || vm.send(vm.draft.get_untracked());

    let sessions_error = Signal::derive(move || vm.sessions_state.with(|s| s.error().map(str::to_string)));
    let transcript_error = Signal::derive(move || vm.transcript_state.with(|s| s.error().map(str::to_string)));

    view! {
        <div style="height: 100%; display: flex;">
            <aside style="width: 260px; flex-shrink: 0; display: flex; flex-direction: column; gap: 12px; padding: 16px; border-right: 1px solid var(--colorNeutralStroke2);">
                <NewSessionForm
                    on_create=on_create
                    busy=Signal::derive(move || vm.sessions_state.with(|s| s.is_submitting()))
                />
                <ErrorBanner
                    message=sessions_error
                    on_retry=Callback::new(move |_| vm.load_sessions())
                />
                <SessionList
                    sessions=vm.sessions
                    active=vm.active_session
                    loading=Signal::derive(move || vm.sessions_state.with(|s| s.is_loading()))
                    on_select=on_select
                    on_delete=on_delete
                />
            </aside>

            <section style="flex: 1; min-width: 0; display: flex; flex-direction: column;">
                <div style="padding: 16px 20px; border-bottom: 1px solid var(--colorNeutralStroke2);">
                    <h1 style="font-size: 20px; font-weight: bold;">"Código Tributário - Chat"</h1>
                    <p style="font-size: 13px; color: var(--colorNeutralForeground3);">
                        {move || active_title().unwrap_or_else(|| "Assistente para questões tributárias".to_string())}
                    </p>
                </div>

                <div style="padding: 0 20px;">
                    <DegradedBanner visible=vm.degraded />
                    <ErrorBanner message=transcript_error />
                    <ErrorBanner message=vm.notice />
                </div>

                <div
                    node_ref=messages_ref
                    style="flex: 1; overflow-y: auto; display: flex; flex-direction: column; gap: 12px; padding: 16px 20px;"
                >
                    {move || {
                        vm.transcript_state.with(|s| s.is_loading()).then(|| view! {
                            <Flex justify=FlexJustify::Center><Spinner /></Flex>
                        })
                    }}
                    {move || {
                        let empty = vm.transcript.with(|t| t.entries().is_empty());
                        (empty && !vm.transcript_state.with(|s| s.is_loading())).then(|| view! {
                            <div style="margin: auto; text-align: center; color: var(--colorNeutralForeground3);">
                                <div style="font-size: 16px; font-weight: 600;">"Olá! Sou o assistente fiscal."</div>
                                <div style="font-size: 13px;">"Faça uma pergunta ou escolha uma sugestão ao lado."</div>
                            </div>
                        })
                    }}
                    <For
                        each=move || vm.transcript.with(|t| t.entries().to_vec())
                        key=|entry| entry.key()
                        let:entry
                    >
                        <MessageBubble entry=entry />
                    </For>
                    {move || is_sending().then(|| view! { <TypingIndicator /> })}
                </div>

                <div
                    style="display: flex; gap: 8px; padding: 12px 20px; border-top: 1px solid var(--colorNeutralStroke2);"
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" && !ev.shift_key() {
                            ev.prevent_default();
                            send_draft();
                        }
                    }
                >
                    <div style="flex: 1;">
                        <Input
                            value=vm.draft
                            placeholder="Digite sua pergunta sobre tributação..."
                            disabled=Signal::derive(is_sending)
                        />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || is_sending() || vm.draft.get().trim().is_empty())
                        on_click=move |_| send_draft()
                    >
                        {icon("send")}
                        " Enviar"
                    </Button>
                </div>
            </section>

            <SuggestionsSidebar on_pick=on_pick disabled=Signal::derive(is_sending) />
        </div>
    }
}

