//! Tab strip and tab panels.

use leptos::prelude::*;

use crate::provider::use_panel;

#[component]
pub fn TabBar() -> impl IntoView {
    let ctx = use_panel();
    let view = ctx.view.signal();
    let tabs = view.with_untracked(|v| v.tabs().to_vec());

    view! {
        <nav class="tabs">
            {tabs.into_iter().map(|tab| {
                let tab_id = tab.tab_id();
                let key = tab.key;
                let active_key = key.clone();
                let is_active = move || view.with(|v| v.is_tab_active(&active_key));
                view! {
                    <button
                        id=tab_id
                        class=move || if is_active() { "tab active" } else { "tab" }
                        on:click=move |_| ctx.handle("switch tab", |c, v| c.switch_tab(v, &key))
                    >
                        {tab.label}
                    </button>
                }
            }).collect::<Vec<_>>()}
        </nav>
    }
}

/// A panel shown only while its tab is active.
#[component]
pub fn TabPanel(key: &'static str, children: Children) -> impl IntoView {
    let view = use_panel().view.signal();
    let visible = move || view.with(|v| v.is_tab_active(key));

    view! {
        <section id=key class=move || if visible() { "panel visible" } else { "panel" }>
            {children()}
        </section>
    }
}
