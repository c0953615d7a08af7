use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::overlay::{backdrop_class, closes_on_backdrop, panel_class};

/// Оверлей, который не размонтируется при скрытии.
///
/// Кнопка закрытия есть всегда; клик по подложке закрывает только при
/// `allow_click_outside`. Клики внутри панели до подложки не доходят.
#[component]
pub(crate) fn Modal(
    #[prop(into)] visible: Signal<bool>,
    on_close: Callback<()>,
    #[prop(optional)] allow_click_outside: bool,
    children: Children,
) -> impl IntoView {
    let on_backdrop_click = move |_: MouseEvent| {
        if closes_on_backdrop(allow_click_outside, visible.get_untracked()) {
            on_close.run(());
        }
    };

    view! {
        <div class=move || backdrop_class(visible.get()) on:click=on_backdrop_click>
            <div
                class=move || panel_class(visible.get())
                on:click=|ev: MouseEvent| ev.stop_propagation()
            >
                <button class="overlay-dismiss" on:click=move |_| on_close.run(())>
                    "×"
                </button>
                {children()}
            </div>
        </div>
    }
}
