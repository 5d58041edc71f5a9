use crate::dashboards::FiscalDashboard;
use crate::domain::a001_document::ui::DocumentsPage;
use crate::domain::a003_chat_message::ui::ChatPage;
use crate::layout::Shell;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div style="padding: 40px; text-align: center;">
            <h1 style="font-size: 20px; font-weight: 600;">"Página não encontrada"</h1>
            <a href="/chat">"Voltar ao chat"</a>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=ChatPage />
                    <Route path=path!("/chat") view=ChatPage />
                    <Route path=path!("/documentos") view=DocumentsPage />
                    <Route path=path!("/base-dados") view=DocumentsPage />
                    <Route path=path!("/dashboard") view=FiscalDashboard />
                </Routes>
            </Shell>
        </Router>
    }
}
