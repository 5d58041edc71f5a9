use crate::domain::a003_chat_message::TranscriptEntry;
use crate::shared::date_utils::format_time;
use crate::shared::icons::icon;
use contracts::domain::a003_chat_message::{MessageMetadata, MessageRole};
use leptos::prelude::*;

fn bubble_style(role: MessageRole, is_error: bool) -> &'static str {
    if is_error {
        return "background: var(--color-error-50); border: 1px solid var(--color-error-100); color: var(--color-error); padding: 10px 14px; border-radius: 12px;";
    }
    match role {
        MessageRole::User => "background: var(--colorBrandBackground2); padding: 10px 14px; border-radius: 12px;",
        _ => "background: var(--colorNeutralBackground2); padding: 10px 14px; border-radius: 12px;",
    }
}

/// Confidence and timing line under an answer
fn meta_line(meta: &MessageMetadata) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(confidence) = meta.confidence_percent() {
        parts.push(format!("Confiança {}", confidence.replace('.', ",")));
    }
    if let Some(secs) = meta.processing_time {
        parts.push(format!("{:.1}s", secs).replace('.', ","));
    }
    (!parts.is_empty()).then(|| parts.join(" • "))
}

#[component]
#[allow(non_snake_case)]
pub fn MessageBubble(entry: TranscriptEntry) -> impl IntoView {
    let role = entry.role();
    let is_error = entry.is_error();
    let is_user = role == MessageRole::User;
    let metadata = match &entry {
        TranscriptEntry::Message(m) => m.metadata.clone(),
        TranscriptEntry::Error { .. } => None,
    };
    let citations: Vec<String> = metadata
        .as_ref()
        .map(|m| m.sources.iter().map(|c| c.label()).collect())
        .unwrap_or_default();
    let meta = metadata.as_ref().and_then(meta_line);
    let author = if is_error { "Erro" } else { role.label() };

    view! {
        <div style=if is_user {
            "align-self: flex-end; max-width: 70%;"
        } else {
            "align-self: flex-start; max-width: 70%;"
        }>
            <div style="font-size: 12px; color: var(--colorNeutralForeground3); margin-bottom: 4px;">
                {author}
                <time style="margin-left: 6px; opacity: 0.7;">{format_time(&entry.at())}</time>
            </div>
            <div style=bubble_style(role, is_error)>
                {is_error.then(|| icon("alert"))}
                <div style="white-space: pre-wrap;">{entry.text().to_string()}</div>
                {(!citations.is_empty()).then(|| view! {
                    <div style="margin-top: 8px; display: flex; flex-wrap: wrap; gap: 4px;">
                        {citations.into_iter().map(|label| view! {
                            <span class="badge badge--neutral" style="font-size: 11px;">{label}</span>
                        }).collect_view()}
                    </div>
                })}
                {meta.map(|line| view! {
                    <div style="font-size: 11px; opacity: 0.7; margin-top: 6px;">{line}</div>
                })}
            </div>
        </div>
    }
}

/// Three dots shown while an answer is pending
#[component]
#[allow(non_snake_case)]
pub fn TypingIndicator() -> impl IntoView {
    view! {
        <div style="align-self: flex-start; padding: 10px 14px; border-radius: 12px; background: var(--colorNeutralBackground2);">
            <span class="typing-indicator" aria-label="Assistente digitando">
                <span></span><span></span><span></span>
            </span>
        </div>
    }
}
