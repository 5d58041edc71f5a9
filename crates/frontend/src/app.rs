use crate::layout::global_context::AppGlobalContext;
use crate::routes::AppRoutes;
use crate::shared::config::AppConfig;
use crate::shared::services::Services;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    provide_context(AppGlobalContext::new());
    // one client and one set of services for the whole app
    provide_context(Services::for_browser(config));

    view! {
        <ConfigProvider>
            <AppRoutes />
        </ConfigProvider>
    }
}
