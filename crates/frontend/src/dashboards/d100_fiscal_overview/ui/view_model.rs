use crate::shared::api::RequestScope;
use crate::shared::fallback::{recover, Recovered};
use crate::shared::page_state::LoadState;
use crate::shared::services::Services;
use chrono::Utc;
use contracts::dashboards::d100_fiscal_overview::{DashboardSnapshot, NfeSnapshot};
use leptos::prelude::*;

/// Overview and NFe panels load independently; one failing leaves the other usable
#[derive(Clone, Copy)]
pub struct DashboardVm {
    pub snapshot: RwSignal<Option<DashboardSnapshot>>,
    pub snapshot_state: RwSignal<LoadState>,
    pub nfe: RwSignal<Option<NfeSnapshot>>,
    pub nfe_state: RwSignal<LoadState>,
    pub degraded: RwSignal<bool>,
    services: StoredValue<Services>,
    page: StoredValue<RequestScope>,
    snapshot_req: StoredValue<RequestScope>,
    nfe_req: StoredValue<RequestScope>,
}

impl DashboardVm {
    pub fn new(services: Services) -> Self {
        let page = RequestScope::new();
        Self {
            snapshot: RwSignal::new(None),
            snapshot_state: RwSignal::new(LoadState::default()),
            nfe: RwSignal::new(None),
            nfe_state: RwSignal::new(LoadState::default()),
            degraded: RwSignal::new(false),
            services: StoredValue::new(services),
            snapshot_req: StoredValue::new(page.child()),
            nfe_req: StoredValue::new(page.child()),
            page: StoredValue::new(page),
        }
    }

    pub fn scope(&self) -> RequestScope {
        self.page.get_value()
    }

    pub fn is_loading(&self) -> impl Fn() -> bool + Copy + 'static {
        let (a, b) = (self.snapshot_state, self.nfe_state);
        move || a.with(LoadState::is_loading) || b.with(LoadState::is_loading)
    }

    pub fn load(&self) {
        self.load_snapshot();
        self.load_nfe();
    }

    fn load_snapshot(&self) {
        let vm = *self;
        let services = self.services.get_value();
        let scope = self.snapshot_req.get_value();
        let ticket = scope.begin();
        self.snapshot_state.update(|s| s.begin_load());

        wasm_bindgen_futures::spawn_local(async move {
            let limits = &services.config.api;
            let result = services
                .dashboard
                .snapshot(limits.recent_chats_limit, limits.activity_days, &scope.token())
                .await;
            let result = recover(result, || services.fallback.dashboard(Utc::now()));
            if !scope.should_commit(ticket) {
                return;
            }
            match result {
                Ok(Recovered { value, degraded }) => {
                    vm.degraded.update(|d| *d |= degraded);
                    vm.snapshot.set(Some(value));
                    vm.snapshot_state.update(|s| s.finish_load(Ok::<(), String>(())));
                }
                Err(e) => {
                    log::error!("falha ao carregar painel: {e}");
                    vm.snapshot_state.update(|s| s.finish_load(Err(e.user_message())));
                }
            }
        });
    }

    fn load_nfe(&self) {
        let vm = *self;
        let services = self.services.get_value();
        let scope = self.nfe_req.get_value();
        let ticket = scope.begin();
        self.nfe_state.update(|s| s.begin_load());

        wasm_bindgen_futures::spawn_local(async move {
            let result = services.dashboard.nfe_snapshot(&scope.token()).await;
            let result = recover(result, || services.fallback.nfe());
            if !scope.should_commit(ticket) {
                return;
            }
            match result {
                Ok(Recovered { value, degraded }) => {
                    vm.degraded.update(|d| *d |= degraded);
                    vm.nfe.set(Some(value));
                    vm.nfe_state.update(|s| s.finish_load(Ok::<(), String>(())));
                }
                Err(e) => {
                    log::error!("falha ao carregar estatísticas de NFe: {e}");
                    vm.nfe_state.update(|s| s.finish_load(Err(e.user_message())));
                }
            }
        });
    }
}
