use crate::shared::date_utils::format_relative;
use crate::shared::icons::icon;
use chrono::Utc;
use contracts::domain::a002_chat_session::ChatSession;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn SessionList(
    #[prop(into)] sessions: Signal<Vec<ChatSession>>,
    #[prop(into)] active: Signal<Option<String>>,
    #[prop(into)] loading: Signal<bool>,
    on_select: Callback<String>,
    on_delete: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="session-list" style="display: flex; flex-direction: column; gap: 6px; overflow-y: auto;">
            {move || {
                (loading.get() && sessions.with(Vec::is_empty)).then(|| view! {
                    <Flex justify=FlexJustify::Center style="padding: 16px;">
                        <Spinner />
                    </Flex>
                })
            }}
            {move || {
                (!loading.get() && sessions.with(Vec::is_empty)).then(|| view! {
                    <div style="padding: 12px; font-size: 13px; color: var(--colorNeutralForeground3);">
                        "Nenhuma conversa ainda"
                    </div>
                })
            }}
            <For
                each=move || sessions.get()
                key=|s| (s.id.clone(), s.updated_at)
                let:session
            >
                {{
                    let id = session.id.clone();
                    let select_id = id.clone();
                    let delete_id = id.clone();
                    let is_active = move || active.get().as_deref() == Some(id.as_str());
                    let title = session.display_title().to_string();
                    let when = format_relative(&session.last_activity.unwrap_or(session.updated_at), &Utc::now());
                    let count = session.message_count();
                    view! {
                        <div
                            class=move || if is_active() { "session-item session-item--active" } else { "session-item" }
                            style="display: flex; align-items: center; gap: 8px; padding: 8px 10px; border-radius: 8px; cursor: pointer;"
                            on:click=move |_| on_select.run(select_id.clone())
                        >
                            {icon("chat")}
                            <div style="flex: 1; min-width: 0;">
                                <div style="font-size: 14px; font-weight: 500; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;">
                                    {title}
                                </div>
                                <div style="font-size: 11px; color: var(--colorNeutralForeground3);">
                                    {when}
                                    {(count > 0).then(|| format!(" · {count} msg"))}
                                </div>
                            </div>
                            <button
                                class="icon-btn"
                                title="Excluir conversa"
                                on:click=move |ev| {
                                    ev.stop_propagation();
                                    on_delete.run(delete_id.clone());
                                }
                            >
                                {icon("trash")}
                            </button>
                        </div>
                    }
                }}
            </For>
        </div>
    }
}
