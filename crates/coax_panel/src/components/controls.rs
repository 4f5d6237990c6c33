//! Command buttons.

use coax_client::{SaveOutcome, ids};
use leptos::prelude::*;

use crate::provider::use_panel;

/// Start/stop buttons of a section; visibility follows the control state.
#[component]
pub fn ButtonBar(section: &'static str) -> impl IntoView {
    let ctx = use_panel();
    let view = ctx.view.signal();
    let buttons = view.with_untracked(|v| v.buttons_in(section).cloned().collect::<Vec<_>>());

    view! {
        <div class="buttons">
            {buttons.into_iter().map(|button| {
                let id = button.id.clone();
                let hidden_id = id.clone();
                let hidden = move || view.with(|v| v.button(&hidden_id).map(|b| b.hidden).unwrap_or(true));
                let on_click = move |_| match id.as_str() {
                    ids::BTN_START => ctx.spawn("start", |c, v| async move { c.start(&v).await }),
                    ids::BTN_STOP => ctx.spawn("stop", |c, v| async move { c.stop(&v).await }),
                    other => log::warn!("no handler for button {other}"),
                };
                view! {
                    <button id=button.id class="command" hidden=hidden on:click=on_click>
                        {button.label}
                    </button>
                }
            }).collect::<Vec<_>>()}
        </div>
    }
}

/// Validates and submits the config form.
#[component]
pub fn SaveButton() -> impl IntoView {
    let ctx = use_panel();
    let on_click = move |_| {
        ctx.spawn("save config", |c, v| async move {
            if let SaveOutcome::Invalid(fields) = c.save_config(&v).await? {
                log::info!("config not submitted, {} invalid field(s)", fields.len());
            }
            Ok(())
        })
    };

    view! {
        <button type="button" class="command" on:click=on_click>"Save"</button>
    }
}
