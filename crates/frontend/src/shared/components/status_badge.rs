use contracts::domain::a001_document::aggregate::ProcessingStatus;
use leptos::prelude::*;

fn status_class(status: ProcessingStatus) -> &'static str {
    match status {
        ProcessingStatus::Completed => "badge badge--success",
        ProcessingStatus::Processing => "badge badge--primary",
        ProcessingStatus::Pending => "badge badge--warning",
        ProcessingStatus::Failed => "badge badge--error",
    }
}

/// Colored pill showing a document's processing state
#[component]
pub fn StatusBadge(#[prop(into)] status: Signal<ProcessingStatus>) -> impl IntoView {
    view! {
        <span class=move || status_class(status.get())>
            {move || status.get().label()}
        </span>
    }
}
