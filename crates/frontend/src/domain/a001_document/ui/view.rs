//! Documents page - View Component

use super::document_card::DocumentCard;
use super::upload_panel::UploadPanel;
use super::view_model::DocumentsPageVm;
use crate::shared::components::{DegradedBanner, ErrorBanner, PageHeader, PaginationControls, StatCard};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_file_size, format_int};
use crate::shared::services::use_services;
use contracts::domain::a001_document::DocumentCategory;
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn DocumentsPage() -> impl IntoView {
    let vm = DocumentsPageVm::new(use_services());
    let scope = vm.scope();
    on_cleanup(move || scope.cancel());

    vm.load_page(1);
    vm.load_vector_info();

    let legislacao = vm.category_count(DocumentCategory::Legislacao);
    let notas = vm.category_count(DocumentCategory::NotasFiscais);
    let loading = Signal::derive(move || vm.state.with(|s| s.is_loading()));
    let busy = Signal::derive(move || vm.state.with(|s| s.is_busy()));
    let pending = Signal::derive(move || vm.library.with(|l| l.pending_ids().len()));
    let list_error = Signal::derive(move || vm.state.with(|s| s.error().map(str::to_string)));
    let on_delete = Callback::new(move |id: String| vm.delete(id));
    let on_page_change = Callback::new(move |page: u32| vm.load_page(page));

    view! {
        <div style="padding: 20px; display: flex; flex-direction: column; gap: 16px; overflow-y: auto; height: 100%;">
            <PageHeader
                title="Base de Dados"
                icon_name="documents"
                subtitle="Legislação e notas fiscais usadas nas respostas do assistente"
            >
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || busy.get() || vm.polling.get() || pending.get() == 0)
                    on_click=move |_| vm.check_processing()
                >
                    {move || format!("Verificar processamento ({})", pending.get())}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=busy
                    on_click=move |_| vm.refresh()
                >
                    {icon("refresh")}
                    " Atualizar"
                </Button>
            </PageHeader>

            <DegradedBanner visible=vm.degraded />
            <ErrorBanner message=list_error on_retry=Callback::new(move |_| vm.refresh()) />
            <ErrorBanner message=vm.notice />

            <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 12px;">
                <StatCard
                    label="Documentos"
                    icon_name="documents"
                    value=Signal::derive(move || Some(format_int(vm.library.with(|l| l.total()))))
                    subtitle=Signal::derive(move || {
                        vm.vector.get().and_then(|v| v.document_count).map(|n| format!("{} no índice vetorial", format_int(n)))
                    })
                />
                <StatCard
                    label="Legislação"
                    icon_name="legislacao"
                    value=Signal::derive(move || Some(format_int(legislacao() as u64)))
                />
                <StatCard
                    label="Notas Fiscais"
                    icon_name="notas_fiscais"
                    value=Signal::derive(move || Some(format_int(notas() as u64)))
                />
                <StatCard
                    label="Tamanho"
                    icon_name="upload"
                    value=Signal::derive(move || Some(format_file_size(vm.library.with(|l| l.total_size()))))
                    subtitle=Signal::derive(move || {
                        Some(format!("{} processados", vm.library.with(|l| l.processed_count())))
                    })
                />
            </div>

            <UploadPanel vm=vm />

            {move || {
                (loading.get() && vm.library.with(|l| l.is_empty())).then(|| view! {
                    <Flex justify=FlexJustify::Center style="padding: 24px;"><Spinner /></Flex>
                })
            }}
            {move || {
                (!loading.get() && vm.library.with(|l| l.is_empty())).then(|| view! {
                    <div style="padding: 24px; text-align: center; color: var(--colorNeutralForeground3);">
                        "Nenhum documento enviado ainda"
                    </div>
                })
            }}

            <div style="display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 12px;">
                <For
                    each=move || vm.library.with(|l| l.documents().to_vec())
                    key=|doc| (doc.id.clone(), doc.status)
                    let:doc
                >
                    {{
                        let id = doc.id.clone();
                        view! {
                            <DocumentCard
                                doc=doc
                                deleting=Signal::derive(move || vm.deleting.get().as_deref() == Some(id.as_str()))
                                on_delete=on_delete
                            />
                        }
                    }}
                </For>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || vm.library.with(|l| l.page()))
                total_pages=Signal::derive(move || vm.library.with(|l| l.total_pages()))
                total_count=Signal::derive(move || vm.library.with(|l| l.total()))
                on_page_change=on_page_change
                busy=loading
            />
        </div>
    }
}
