use crate::shared::number_format::format_int;
use leptos::prelude::*;

/// One horizontal bar, width relative to the largest value
#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub label: String,
    pub value: u64,
    pub percent: f64,
}

impl BarRow {
    pub fn scale(items: impl IntoIterator<Item = (String, u64)>) -> Vec<BarRow> {
        let items: Vec<(String, u64)> = items.into_iter().collect();
        let max = items.iter().map(|(_, v)| *v).max().unwrap_or(0);
        items
            .into_iter()
            .map(|(label, value)| BarRow {
                label,
                value,
                percent: if max == 0 { 0.0 } else { value as f64 * 100.0 / max as f64 },
            })
            .collect()
    }
}

#[component]
#[allow(non_snake_case)]
pub fn BarList(
    #[prop(into)] title: String,
    #[prop(into)] rows: Signal<Vec<BarRow>>,
    #[prop(into, optional)] empty_text: Option<String>,
) -> impl IntoView {
    let empty_text = empty_text.unwrap_or_else(|| "Sem dados".to_string());
    view! {
        <div class="dashboard-panel" style="padding: 16px; border: 1px solid var(--colorNeutralStroke2); border-radius: 10px;">
            <h3 style="font-size: 15px; font-weight: 600; margin-bottom: 12px;">{title}</h3>
            {move || {
                let rows = rows.get();
                if rows.is_empty() {
                    return view! {
                        <div style="font-size: 13px; color: var(--colorNeutralForeground3);">{empty_text.clone()}</div>
                    }.into_any();
                }
                rows.into_iter().map(|row| view! {
                    <div style="display: flex; align-items: center; gap: 8px; margin-bottom: 6px; font-size: 13px;">
                        <span style="width: 110px; flex-shrink: 0; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;" title=row.label.clone()>
                            {row.label.clone()}
                        </span>
                        <div style="flex: 1; background: var(--colorNeutralBackground3); border-radius: 4px; height: 10px;">
                            <div style=format!("width: {:.1}%; height: 100%; border-radius: 4px; background: var(--colorBrandBackground);", row.percent)></div>
                        </div>
                        <span style="width: 48px; text-align: right;">{format_int(row.value)}</span>
                    </div>
                }).collect_view().into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_relative_to_largest() {
        let rows = BarRow::scale(vec![("5102".to_string(), 8), ("6102".to_string(), 2)]);
        assert_eq!(rows[0].percent, 100.0);
        assert_eq!(rows[1].percent, 25.0);
    }

    #[test]
    fn test_scale_all_zero() {
        let rows = BarRow::scale(vec![("a".to_string(), 0)]);
        assert_eq!(rows[0].percent, 0.0);
        assert!(BarRow::scale(Vec::new()).is_empty());
    }
}
