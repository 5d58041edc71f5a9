use super::bar_list::{BarList, BarRow};
use crate::shared::components::{ErrorBanner, StatCard, StatTone};
use crate::shared::date_utils::format_iso_date;
use crate::shared::number_format::{format_int, format_money, format_number_with_decimals, format_percent};
use contracts::dashboards::d100_fiscal_overview::NfeSnapshot;
use leptos::prelude::*;
use thaw::*;

/// Above this share of failed notes the error card turns red
const ERROR_RATE_ALERT: f64 = 10.0;

fn error_tone(rate: f64) -> StatTone {
    if rate >= ERROR_RATE_ALERT {
        StatTone::Bad
    } else if rate > 0.0 {
        StatTone::Warning
    } else {
        StatTone::Good
    }
}

#[component]
#[allow(non_snake_case)]
pub fn NfeSection(
    #[prop(into)] nfe: Signal<Option<NfeSnapshot>>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
) -> impl IntoView {
    let field = move |f: fn(&NfeSnapshot) -> String| Signal::derive(move || nfe.with(|n| n.as_ref().map(f)));

    let cfop_rows = Signal::derive(move || {
        nfe.with(|n| {
            n.as_ref()
                .map(|n| BarRow::scale(n.cfop_distribution.iter().map(|c| (c.cfop.clone(), c.count))))
                .unwrap_or_default()
        })
    });
    let ncm_rows = Signal::derive(move || {
        nfe.with(|n| {
            n.as_ref()
                .map(|n| BarRow::scale(n.ncm_top.iter().map(|c| (c.ncm.clone(), c.count))))
                .unwrap_or_default()
        })
    });
    let timeline_rows = Signal::derive(move || {
        nfe.with(|n| {
            n.as_ref()
                .map(|n| BarRow::scale(n.timeline.iter().map(|p| (format_iso_date(&p.date), p.nfe_count))))
                .unwrap_or_default()
        })
    });
    let error_rows = Signal::derive(move || {
        nfe.with(|n| {
            n.as_ref()
                .map(|n| BarRow::scale(n.errors.error_by_type.iter().map(|e| (e.file_type.to_uppercase(), e.count))))
                .unwrap_or_default()
        })
    });

    view! {
        <section style="display: flex; flex-direction: column; gap: 12px;">
            <div style="display: flex; align-items: center; gap: 8px;">
                <h2 style="font-size: 18px; font-weight: 600;">"Notas Fiscais Eletrônicas"</h2>
                {move || loading.get().then(|| view! { <Spinner /> })}
            </div>
            <ErrorBanner message=error />

            <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 12px;">
                <StatCard
                    label="NFes"
                    icon_name="notas_fiscais"
                    value=field(|n| format_int(n.statistics.total_nfes))
                    subtitle=field(|n| format!("{} pendentes", format_int(n.statistics.pending_nfes())))
                />
                <StatCard
                    label="Processadas"
                    icon_name="documents"
                    value=field(|n| format_int(n.statistics.processed_nfes))
                    subtitle=field(|n| format!("{} do total", format_percent(n.statistics.processing_rate)))
                />
                <StatCard
                    label="Com erro"
                    icon_name="alert"
                    value=field(|n| format_int(n.statistics.error_nfes))
                    tone=Signal::derive(move || {
                        nfe.with(|n| n.as_ref().map(|n| error_tone(n.statistics.error_rate())).unwrap_or_default())
                    })
                    subtitle=field(|n| format_percent(n.statistics.error_rate()))
                />
                <StatCard
                    label="Valor total"
                    icon_name="dashboard"
                    value=field(|n| format_money(n.values.total_value))
                    subtitle=field(|n| format!("média {}", format_money(n.values.average_value)))
                />
                <StatCard
                    label="Chunks"
                    icon_name="legislacao"
                    value=field(|n| format_int(n.statistics.total_chunks))
                    subtitle=field(|n| format!("{} por NFe", format_number_with_decimals(n.statistics.avg_chunks_per_nfe, 1)))
                />
            </div>

            {move || {
                nfe.with(|n| {
                    n.as_ref().map(|n| {
                        let values = &n.values;
                        format!(
                            "{} notas · maior {} · menor {}",
                            format_int(values.nfe_count),
                            format_money(values.max_value),
                            format_money(values.min_value)
                        )
                    })
                })
                .map(|line| view! {
                    <div style="font-size: 13px; color: var(--colorNeutralForeground3);">{line}</div>
                })
            }}

            <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 12px;">
                <BarList title="Distribuição por CFOP" rows=cfop_rows />
                <BarList title="NCM mais frequentes" rows=ncm_rows />
                <BarList title="Processamento (30 dias)" rows=timeline_rows />
                <BarList title="Erros por tipo de arquivo" rows=error_rows empty_text="Nenhum erro registrado" />
            </div>
        </section>
    }
}
