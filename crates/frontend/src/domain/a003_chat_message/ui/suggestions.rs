use crate::shared::icons::icon;
use leptos::prelude::*;

/// (tax area, ready-made question)
pub const SUGGESTIONS: [(&str, &str); 6] = [
    ("ICMS", "Como calcular ICMS sobre vendas interestaduais?"),
    ("IPI", "Quais produtos são isentos de IPI?"),
    ("Simples Nacional", "Limites de faturamento para Simples Nacional em 2024"),
    ("IRPF", "Quais são as deduções permitidas na declaração de IRPF?"),
    ("PIS/COFINS", "Como calcular PIS e COFINS no regime cumulativo?"),
    ("ISS", "Alíquotas de ISS para serviços de tecnologia"),
];

const FEATURES: [&str; 6] = [
    "Citações legais precisas",
    "Base legal atualizada",
    "Respostas contextualizadas",
    "Análise jurisprudencial",
    "Cálculos tributários",
    "Orientações práticas",
];

#[component]
#[allow(non_snake_case)]
pub fn SuggestionsSidebar(on_pick: Callback<String>, #[prop(into)] disabled: Signal<bool>) -> impl IntoView {
    view! {
        <aside style="width: 300px; flex-shrink: 0; display: flex; flex-direction: column; gap: 12px; padding: 16px; border-left: 1px solid var(--colorNeutralStroke2); overflow-y: auto;">
            <div style="display: flex; align-items: center; gap: 8px;">
                {icon("lightbulb")}
                <h2 style="font-size: 16px; font-weight: 600;">"Sugestões de Consulta"</h2>
            </div>
            {SUGGESTIONS.iter().map(|&(area, question)| view! {
                <button
                    class="suggestion"
                    style="text-align: left; padding: 10px 12px; border-radius: 10px; border: 1px solid var(--colorNeutralStroke2); background: var(--colorNeutralBackground1); cursor: pointer;"
                    disabled=move || disabled.get()
                    on:click=move |_| on_pick.run(question.to_string())
                >
                    <div style="font-size: 12px; font-weight: 600; color: var(--colorBrandForeground1);">{area}</div>
                    <div style="font-size: 13px;">{question}</div>
                </button>
            }).collect_view()}
            <h3 style="font-size: 14px; font-weight: 600; margin-top: 8px;">"Recursos"</h3>
            <ul style="font-size: 13px; padding-left: 18px; color: var(--colorNeutralForeground2);">
                {FEATURES.iter().map(|f| view! { <li>{*f}</li> }).collect_view()}
            </ul>
        </aside>
    }
}
