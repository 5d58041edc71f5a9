use super::bar_list::{BarList, BarRow};
use super::nfe_section::NfeSection;
use super::view_model::DashboardVm;
use crate::shared::components::{DegradedBanner, ErrorBanner, PageHeader, StatCard};
use crate::shared::date_utils::{format_datetime, format_iso_date};
use crate::shared::icons::icon;
use crate::shared::number_format::format_int;
use crate::shared::services::use_services;
use contracts::dashboards::d100_fiscal_overview::DashboardSnapshot;
use contracts::domain::a001_document::DocumentCategory;
use contracts::shared::timestamp::parse_timestamp;
use leptos::prelude::*;
use thaw::*;

/// "legislacao" -> "Legislação"; unknown buckets are shown as sent
fn category_label(raw: &str) -> String {
    DocumentCategory::from_str(raw)
        .map(|c| c.label().to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn category_rows(snapshot: &DashboardSnapshot) -> Vec<BarRow> {
    BarRow::scale(
        snapshot
            .documents_by_category
            .iter()
            .map(|c| (category_label(&c.category), c.count)),
    )
}

fn activity_rows(snapshot: &DashboardSnapshot) -> Vec<BarRow> {
    BarRow::scale(
        snapshot
            .activity
            .iter()
            .map(|d| (format_iso_date(&d.date), d.chat_count)),
    )
}

#[component]
#[allow(non_snake_case)]
pub fn FiscalDashboard() -> impl IntoView {
    let vm = DashboardVm::new(use_services());
    let scope = vm.scope();
    on_cleanup(move || scope.cancel());
    vm.load();

    let is_loading = vm.is_loading();
    let snapshot = vm.snapshot;
    let field = move |f: fn(&DashboardSnapshot) -> String| {
        Signal::derive(move || snapshot.with(|s| s.as_ref().map(f)))
    };
    let rows = move |f: fn(&DashboardSnapshot) -> Vec<BarRow>| {
        Signal::derive(move || snapshot.with(|s| s.as_ref().map(f).unwrap_or_default()))
    };

    view! {
        <div style="padding: 20px; display: flex; flex-direction: column; gap: 16px; overflow-y: auto; height: 100%;">
            <PageHeader title="Dashboard" icon_name="dashboard" subtitle="Uso do assistente e situação da base fiscal">
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(is_loading)
                    on_click=move |_| vm.load()
                >
                    {icon("refresh")}
                    " Atualizar"
                </Button>
            </PageHeader>

            <DegradedBanner visible=vm.degraded />
            <ErrorBanner
                message=Signal::derive(move || vm.snapshot_state.with(|s| s.error().map(str::to_string)))
                on_retry=Callback::new(move |_| vm.load())
            />

            <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 12px;">
                <StatCard
                    label="Documentos"
                    icon_name="documents"
                    value=field(|s| format_int(s.stats.total_documents))
                />
                <StatCard
                    label="Perguntas"
                    icon_name="chat"
                    value=field(|s| format_int(s.stats.total_chats))
                    subtitle=field(|s| format!("{} no período", format_int(s.chats_in_period())))
                />
                <StatCard
                    label="Sessões"
                    icon_name="chat"
                    value=field(|s| format_int(s.stats.total_sessions))
                />
                <StatCard
                    label="Dia mais ativo"
                    icon_name="dashboard"
                    value=field(|s| {
                        s.busiest_day()
                            .map(|d| format_iso_date(&d.date))
                            .unwrap_or_else(|| "—".to_string())
                    })
                    subtitle=field(|s| {
                        s.busiest_day()
                            .map(|d| format!("{} perguntas", format_int(d.chat_count)))
                            .unwrap_or_default()
                    })
                />
            </div>

            <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 12px;">
                <BarList title="Documentos por categoria" rows=rows(category_rows) />
                <BarList title="Atividade por dia" rows=rows(activity_rows) />
                <div class="dashboard-panel" style="padding: 16px; border: 1px solid var(--colorNeutralStroke2); border-radius: 10px;">
                    <h3 style="font-size: 15px; font-weight: 600; margin-bottom: 12px;">"Perguntas recentes"</h3>
                    {move || {
                        let chats = snapshot.with(|s| s.as_ref().map(|s| s.recent_chats.clone()).unwrap_or_default());
                        if chats.is_empty() {
                            return view! {
                                <div style="font-size: 13px; color: var(--colorNeutralForeground3);">"Nenhuma pergunta ainda"</div>
                            }.into_any();
                        }
                        chats.into_iter().map(|chat| {
                            let when = chat
                                .created_at
                                .as_deref()
                                .and_then(parse_timestamp)
                                .map(|at| format_datetime(&at))
                                .unwrap_or_default();
                            view! {
                                <div style="padding: 6px 0; border-bottom: 1px solid var(--colorNeutralStroke3); font-size: 13px;">
                                    <div style="white-space: nowrap; overflow: hidden; text-overflow: ellipsis;">{chat.question}</div>
                                    <div style="font-size: 11px; color: var(--colorNeutralForeground3);">{when}</div>
                                </div>
                            }
                        }).collect_view().into_any()
                    }}
                </div>
            </div>

            <NfeSection
                nfe=vm.nfe
                loading=Signal::derive(move || vm.nfe_state.with(|s| s.is_loading()))
                error=Signal::derive(move || vm.nfe_state.with(|s| s.error().map(str::to_string)))
            />
        </div>
    }
}
