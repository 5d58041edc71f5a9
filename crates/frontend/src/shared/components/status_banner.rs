use crate::shared::icons::icon;
use leptos::prelude::*;

/// Inline error line with an optional retry action
#[component]
pub fn ErrorBanner(
    #[prop(into)]
    message: Signal<Option<String>>,
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class="banner banner--error" role="alert">
                    {icon("alert")}
                    <span class="banner__text">{text}</span>
                    {on_retry.map(|retry| view! {
                        <button class="banner__action" on:click=move |_| retry.run(())>
                            "Tentar novamente"
                        </button>
                    })}
                </div>
            }
        })
    }
}

/// Shown when the page is displaying local sample data instead of the backend
#[component]
pub fn DegradedBanner(#[prop(into)] visible: Signal<bool>) -> impl IntoView {
    move || {
        visible.get().then(|| {
            view! {
                <div class="banner banner--warning" role="status">
                    {icon("alert")}
                    <span class="banner__text">
                        "Servidor indisponível. Exibindo dados de exemplo."
                    </span>
                </div>
            }
        })
    }
}
