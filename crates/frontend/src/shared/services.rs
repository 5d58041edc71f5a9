//! Composition root for the REST services.

use super::api::{ApiClient, FetchTransport};
use super::config::AppConfig;
use super::fallback::{strategy_for, FallbackStrategy};
use crate::dashboards::d100_fiscal_overview::DashboardService;
use crate::domain::a001_document::DocumentService;
use crate::domain::a002_chat_session::SessionService;
use crate::domain::a003_chat_message::ChatService;
use leptos::prelude::*;
use std::sync::Arc;

/// Every service plus the degraded-mode strategy, built once and shared
/// through context
#[derive(Clone)]
pub struct Services {
    pub config: Arc<AppConfig>,
    pub documents: DocumentService,
    pub sessions: SessionService,
    pub chats: ChatService,
    pub dashboard: DashboardService,
    pub fallback: Arc<dyn FallbackStrategy>,
}

impl Services {
    pub fn new(config: AppConfig, api: ApiClient) -> Self {
        let fallback = strategy_for(config.ui.fallback_mode);
        log::info!("API em {} (modo {})", api.base_url(), fallback.name());
        Self {
            documents: DocumentService::new(api.clone()),
            sessions: SessionService::new(api.clone()),
            chats: ChatService::new(api.clone()),
            dashboard: DashboardService::new(api),
            fallback,
            config: Arc::new(config),
        }
    }

    /// Browser wiring: `fetch` transport against the configured base URL
    pub fn for_browser(config: AppConfig) -> Self {
        let api = ApiClient::new(config.base_url(), Arc::new(FetchTransport))
            .with_header("Accept", "application/json");
        Self::new(config, api)
    }
}

pub fn use_services() -> Services {
    use_context::<Services>().expect("Services context not found")
}
