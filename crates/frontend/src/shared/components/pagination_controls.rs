use crate::shared::icons::icon;
use leptos::prelude::*;

/// Previous/next pager over 1-based page numbers
#[component]
pub fn PaginationControls(
    /// Current page, starting at 1
    #[prop(into)]
    current_page: Signal<u32>,
    #[prop(into)]
    total_pages: Signal<u32>,
    /// Total count of items across all pages
    #[prop(into)]
    total_count: Signal<u64>,
    on_page_change: Callback<u32>,
    /// Disables both buttons while a page is in flight
    #[prop(into, optional)]
    busy: Signal<bool>,
) -> impl IntoView {
    let at_first = move || busy.get() || current_page.get() <= 1;
    let at_last = move || busy.get() || current_page.get() >= total_pages.get().max(1);

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 1 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=at_first
                title="Página anterior"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || {
                    format!(
                        "Página {} de {} ({} itens)",
                        current_page.get().max(1),
                        total_pages.get().max(1),
                        total_count.get()
                    )
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=at_last
                title="Próxima página"
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}
