use crate::shared::icons::icon;
use leptos::prelude::*;

/// Title row for the documents and dashboard pages; actions go on the right
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: MaybeProp<String>,
    /// Name understood by [`icon`], drawn before the title
    #[prop(optional, into)]
    icon_name: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-header__lead">
                {icon_name.map(|name| view! { <span class="page-header__icon">{icon(&name)}</span> })}
                <div>
                    <h1 class="page-header__title">{title}</h1>
                    {move || subtitle.get().map(|s| view! { <p class="page-header__subtitle">{s}</p> })}
                </div>
            </div>
            <div class="page-header__actions">{children()}</div>
        </div>
    }
}
