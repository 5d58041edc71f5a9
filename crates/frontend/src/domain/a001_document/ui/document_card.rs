use crate::shared::components::StatusBadge;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_file_size, truncate_filename};
use contracts::domain::a001_document::Document;
use leptos::prelude::*;

const CARD_FILENAME_CHARS: usize = 36;

#[component]
#[allow(non_snake_case)]
pub fn DocumentCard(
    doc: Document,
    #[prop(into)] deleting: Signal<bool>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let id = doc.id.clone();
    let status = doc.status;
    let tags: Vec<String> = doc.tag_list().into_iter().map(str::to_string).collect();
    let details = format!(
        "{} · {} · {} chunks",
        doc.extension().to_uppercase(),
        format_file_size(doc.file_size),
        doc.chunks_count
    );

    view! {
        <div class="document-card" style="display: flex; flex-direction: column; gap: 8px; padding: 14px; border: 1px solid var(--colorNeutralStroke2); border-radius: 10px; background: var(--colorNeutralBackground1);">
            <div style="display: flex; align-items: center; gap: 8px;">
                {icon(doc.category.as_str())}
                <div style="flex: 1; min-width: 0; font-weight: 600;" title=doc.filename.clone()>
                    {truncate_filename(&doc.filename, CARD_FILENAME_CHARS)}
                </div>
                <StatusBadge status=Signal::stored(status) />
            </div>
            <div style="font-size: 12px; color: var(--colorNeutralForeground3);">
                {doc.category.label()} " · " {details}
            </div>
            <div style="font-size: 12px; color: var(--colorNeutralForeground3);">
                "Enviado em " {format_datetime(&doc.created_at)}
                {doc.processed_at.map(|at| format!(" · processado em {}", format_datetime(&at)))}
            </div>
            {doc.processing_error.clone().map(|e| view! {
                <div style="font-size: 12px; color: var(--color-error);">{e}</div>
            })}
            <div style="display: flex; align-items: center; gap: 4px; flex-wrap: wrap;">
                {tags.into_iter().map(|t| view! {
                    <span class="badge badge--neutral" style="font-size: 11px;">{t}</span>
                }).collect_view()}
                <span style="flex: 1;"></span>
                <button
                    class="icon-btn"
                    title="Excluir documento"
                    disabled=move || deleting.get()
                    on:click=move |_| on_delete.run(id.clone())
                >
                    {icon("trash")}
                </button>
            </div>
        </div>
    }
}
