//! Sidebar menu, one entry per page

use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[derive(Clone, Copy, Debug, PartialEq)]
struct MenuItem {
    path: &'static str,
    label: &'static str,
    icon: &'static str,
    /// Extra paths that highlight this entry
    aliases: &'static [&'static str],
}

const MENU: [MenuItem; 3] = [
    MenuItem {
        path: "/chat",
        label: "Chat",
        icon: "chat",
        aliases: &["/"],
    },
    MenuItem {
        path: "/documentos",
        label: "Base de Dados",
        icon: "documents",
        aliases: &["/base-dados"],
    },
    MenuItem {
        path: "/dashboard",
        label: "Dashboard",
        icon: "dashboard",
        aliases: &[],
    },
];

fn is_active(item: &MenuItem, pathname: &str) -> bool {
    let pathname = match pathname.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    item.path == pathname || item.aliases.contains(&pathname)
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();

    view! {
        <nav class="app-sidebar__content">
            {MENU.into_iter().map(|item| {
                view! {
                    <A href=item.path>
                        <div
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || location.pathname.with(|p| is_active(&item, p))
                            style:padding-left="12px"
                        >
                            <div class="app-sidebar__item-content">
                                {icon(item.icon)}
                                <span>{item.label}</span>
                            </div>
                        </div>
                    </A>
                }
            }).collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_highlights_chat() {
        assert!(is_active(&MENU[0], "/"));
        assert!(is_active(&MENU[0], "/chat/"));
        assert!(!is_active(&MENU[1], "/"));
        assert!(is_active(&MENU[2], "/dashboard"));
    }

    #[test]
    fn test_base_dados_highlights_documents() {
        assert!(is_active(&MENU[1], "/base-dados"));
        assert!(is_active(&MENU[1], "/documentos"));
        assert!(!is_active(&MENU[0], "/base-dados"));
    }
}
