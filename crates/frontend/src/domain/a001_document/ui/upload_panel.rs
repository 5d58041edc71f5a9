use super::view_model::DocumentsPageVm;
use crate::domain::a001_document::library::ACCEPTED_EXTENSIONS;
use crate::shared::icons::icon;
use crate::shared::number_format::format_file_size;
use contracts::domain::a001_document::DocumentCategory;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen::JsCast;

fn accept_attr() -> String {
    ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[component]
#[allow(non_snake_case)]
pub fn UploadPanel(vm: DocumentsPageVm) -> impl IntoView {
    let on_file = move |ev: leptos::ev::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        if let Some(file) = input.and_then(|i| i.files()).and_then(|files| files.get(0)) {
            vm.pick_file(file);
        }
    };

    let uploading = Signal::derive(move || vm.upload_state.with(|s| s.is_submitting()));
    let error = move || vm.upload_state.with(|s| s.error().map(str::to_string));
    let selected = move || {
        vm.form.with(|f| {
            f.file
                .as_ref()
                .map(|file| format!("{} ({})", file.name, format_file_size(file.bytes.len() as u64)))
        })
    };

    view! {
        <div style="display: flex; flex-direction: column; gap: 10px; padding: 16px; border: 1px dashed var(--colorNeutralStroke1); border-radius: 10px;">
            <div style="display: flex; align-items: center; gap: 8px; font-weight: 600;">
                {icon("upload")}
                "Enviar documento"
            </div>
            <input type="file" accept=accept_attr() on:change=on_file />
            {move || selected().map(|s| view! {
                <div style="font-size: 12px; color: var(--colorNeutralForeground3);">{s}</div>
            })}
            <Flex gap=FlexGap::Medium align=FlexAlign::End>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Categoria"</Label>
                    <Select value=vm.category_input>
                        {DocumentCategory::all().into_iter().map(|c| view! {
                            <option value=c.as_str()>{c.label()}</option>
                        }).collect_view()}
                    </Select>
                </Flex>
                <Flex vertical=true gap=FlexGap::Small style="flex: 1;">
                    <Label>"Tags (separadas por vírgula)"</Label>
                    <Input value=vm.tags_input placeholder="icms, fiscal" />
                </Flex>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || uploading.get() || vm.form.with(|f| f.file.is_none()))
                    on_click=move |_| vm.upload()
                >
                    {move || if uploading.get() { "Enviando..." } else { "Enviar" }}
                </Button>
            </Flex>
            {move || error().map(|e| view! {
                <div style="font-size: 13px; color: var(--color-error);">{e}</div>
            })}
        </div>
    }
}
