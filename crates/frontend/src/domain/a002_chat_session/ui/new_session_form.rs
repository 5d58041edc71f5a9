use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// "Nova Conversa" button that expands into a name input
#[component]
#[allow(non_snake_case)]
pub fn NewSessionForm(
    on_create: Callback<String>,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    let expanded = RwSignal::new(false);
    let name = RwSignal::new(String::new());

    let submit = move || {
        let value = name.get_untracked().trim().to_string();
        if value.is_empty() || busy.get_untracked() {
            return;
        }
        on_create.run(value);
        name.set(String::new());
        expanded.set(false);
    };

    let cancel = move || {
        name.set(String::new());
        expanded.set(false);
    };

    view! {
        <Show
            when=move || expanded.get()
            fallback=move || view! {
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| expanded.set(true)
                    attr:style="width: 100%;"
                >
                    {icon("plus")}
                    " Nova Conversa"
                </Button>
            }
        >
            <div
                style="display: flex; flex-direction: column; gap: 8px;"
                on:keydown=move |ev: leptos::ev::KeyboardEvent| match ev.key().as_str() {
                    "Enter" => submit(),
                    "Escape" => cancel(),
                    _ => {}
                }
            >
                <Input value=name placeholder="Nome da conversa..." />
                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Primary
                        size=ButtonSize::Small
                        disabled=Signal::derive(move || busy.get() || name.get().trim().is_empty())
                        on_click=move |_| submit()
                    >
                        "Criar"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| cancel()
                    >
                        "Cancelar"
                    </Button>
                </Flex>
            </div>
        </Show>
    }
}
