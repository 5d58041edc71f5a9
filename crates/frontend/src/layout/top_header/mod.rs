//! Top bar: sidebar toggle, brand and backend mode

use crate::layout::global_context::use_global_context;
use crate::shared::config::FallbackMode;
use crate::shared::icons::icon;
use crate::shared::services::use_services;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let services = use_services();
    let is_sidebar_visible = move || ctx.left_open.get();
    let fixtures = services.config.ui.fallback_mode == FallbackMode::Fixtures;

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ocultar menu" } else { "Mostrar menu" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"ACFI · Assistente Fiscal"</span>
            </div>
            <div class="top-header__actions">
                {fixtures.then(|| view! {
                    <span class="badge badge--warning" title="Dados de exemplo quando o servidor não responde">
                        "modo offline"
                    </span>
                })}
            </div>
        </div>
    }
}
