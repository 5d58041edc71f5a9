//! Documents page - View Model

use super::model;
use crate::domain::a001_document::library::{DocumentLibrary, UploadForm};
use crate::shared::api::RequestScope;
use crate::shared::fallback::Recovered;
use crate::shared::page_state::LoadState;
use crate::shared::services::Services;
use contracts::domain::a001_document::{DocumentCategory, VectorStoreInfo};
use contracts::shared::PageRequest;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct DocumentsPageVm {
    pub library: RwSignal<DocumentLibrary>,
    pub state: RwSignal<LoadState>,
    pub form: RwSignal<UploadForm>,
    /// Raw select/input values; folded into `form` on upload
    pub category_input: RwSignal<String>,
    pub tags_input: RwSignal<String>,
    /// Ready / Submitting / Failed for the upload panel only
    pub upload_state: RwSignal<LoadState>,
    pub deleting: RwSignal<Option<String>>,
    pub polling: RwSignal<bool>,
    pub vector: RwSignal<Option<VectorStoreInfo>>,
    pub degraded: RwSignal<bool>,
    pub notice: RwSignal<Option<String>>,
    services: StoredValue<Services>,
    page: StoredValue<RequestScope>,
    list_req: StoredValue<RequestScope>,
    poll_req: StoredValue<RequestScope>,
}

impl DocumentsPageVm {
    pub fn new(services: Services) -> Self {
        let page = RequestScope::new();
        Self {
            library: RwSignal::new(DocumentLibrary::new()),
            state: RwSignal::new(LoadState::default()),
            form: RwSignal::new(UploadForm::default()),
            category_input: RwSignal::new(DocumentCategory::default().as_str().to_string()),
            tags_input: RwSignal::new(String::new()),
            upload_state: RwSignal::new(LoadState::Ready),
            deleting: RwSignal::new(None),
            polling: RwSignal::new(false),
            vector: RwSignal::new(None),
            degraded: RwSignal::new(false),
            notice: RwSignal::new(None),
            services: StoredValue::new(services),
            list_req: StoredValue::new(page.child()),
            poll_req: StoredValue::new(page.child()),
            page: StoredValue::new(page),
        }
    }

    pub fn scope(&self) -> RequestScope {
        self.page.get_value()
    }

    pub fn category_count(&self, category: DocumentCategory) -> impl Fn() -> usize + Copy + 'static {
        let library = self.library;
        move || library.with(|l| l.count_by_category(category))
    }

    /// Load `page` (1-based); a newer request supersedes this one
    pub fn load_page(&self, page: u32) {
        let vm = *self;
        let services = self.services.get_value();
        let scope = self.list_req.get_value();
        let ticket = scope.begin();
        let request = PageRequest::new(page, services.config.api.page_size);
        self.state.update(|s| s.begin_load());

        wasm_bindgen_futures::spawn_local(async move {
            let result = model::fetch_page(&services, request, &scope.token()).await;
            if !scope.should_commit(ticket) {
                return;
            }
            match result {
                Ok(Recovered { value, degraded }) => {
                    vm.degraded.set(degraded);
                    vm.library.update(|l| l.replace_page(value));
                    vm.state.update(|s| s.finish_load(Ok::<(), String>(())));
                }
                Err(e) => {
                    log::error!("falha ao carregar documentos: {e}");
                    vm.state.update(|s| s.finish_load(Err(e.user_message())));
                }
            }
        });
    }

    pub fn refresh(&self) {
        let current = self.library.with_untracked(|l| l.page()).max(1);
        self.load_page(current);
        self.load_vector_info();
    }

    /// Re-read documents that are not yet processed and fold in forward status moves
    pub fn check_processing(&self) {
        let ids = self.library.with_untracked(|l| l.pending_ids());
        if ids.is_empty() {
            return;
        }
        let vm = *self;
        let services = self.services.get_value();
        let scope = self.poll_req.get_value();
        let ticket = scope.begin();
        self.polling.set(true);

        wasm_bindgen_futures::spawn_local(async move {
            let refreshed = model::fetch_documents(&services, &ids, &scope.token()).await;
            if !scope.should_commit(ticket) {
                return;
            }
            log::debug!("{} de {} documentos atualizados", refreshed.len(), ids.len());
            vm.library.update(|l| l.merge(refreshed));
            vm.polling.set(false);
        });
    }

    pub fn load_vector_info(&self) {
        let vm = *self;
        let services = self.services.get_value();
        let token = self.page.get_value().token();
        wasm_bindgen_futures::spawn_local(async move {
            let info = model::fetch_vector_info(&services, &token).await;
            if !token.is_cancelled() {
                vm.vector.set(info);
            }
        });
    }

    pub fn pick_file(&self, file: web_sys::File) {
        let vm = *self;
        let token = self.page.get_value().token();
        wasm_bindgen_futures::spawn_local(async move {
            let picked = model::read_file(file).await;
            if token.is_cancelled() {
                return;
            }
            match picked {
                Ok(selected) => {
                    vm.form.update(|f| f.file = Some(selected));
                    let message = vm.form.with_untracked(|f| f.validate().err().map(|e| e.to_string()));
                    vm.upload_state.set(match message {
                        Some(m) => LoadState::Failed(m),
                        None => LoadState::Ready,
                    });
                }
                Err(e) => {
                    log::warn!("falha ao ler arquivo: {e}");
                    vm.upload_state.set(LoadState::Failed("Não foi possível ler o arquivo".to_string()));
                }
            }
        });
    }

    pub fn upload(&self) {
        let category = DocumentCategory::from_str(&self.category_input.get_untracked()).unwrap_or_default();
        let tags = self.tags_input.get_untracked();
        self.form.update(|f| {
            f.category = category;
            f.tags = tags;
        });
        let request = match self.form.with_untracked(UploadForm::to_request) {
            Ok(request) => request,
            Err(e) => {
                self.upload_state.set(LoadState::Failed(e.to_string()));
                return;
            }
        };
        if !self.upload_state.try_update(|s| s.begin_submit()).unwrap_or(false) {
            return;
        }

        let vm = *self;
        let services = self.services.get_value();
        let token = self.page.get_value().token();

        wasm_bindgen_futures::spawn_local(async move {
            let result = model::upload(&services, request, &token).await;
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(doc) => {
                    vm.library.update(|l| l.insert_uploaded(doc));
                    vm.form.update(UploadForm::reset);
                    vm.tags_input.set(String::new());
                    vm.upload_state.update(|s| s.finish_submit(Ok::<(), String>(())));
                    vm.notice.set(None);
                }
                Err(e) => {
                    log::error!("falha no upload: {e}");
                    vm.upload_state.update(|s| s.finish_submit(Err(e.user_message())));
                }
            }
        });
    }

    pub fn delete(&self, id: String) {
        if self.deleting.get_untracked().is_some() {
            return;
        }
        self.deleting.set(Some(id.clone()));

        let vm = *self;
        let services = self.services.get_value();
        let token = self.page.get_value().token();

        wasm_bindgen_futures::spawn_local(async move {
            let result = model::delete(&services, &id, &token).await;
            if token.is_cancelled() {
                return;
            }
            vm.deleting.set(None);
            match result {
                Ok(()) => {
                    vm.library.update(|l| {
                        l.remove(&id);
                    });
                }
                Err(e) => {
                    log::warn!("falha ao excluir documento {id}: {e}");
                    vm.notice.set(Some(e.user_message()));
                }
            }
        });
    }
}
