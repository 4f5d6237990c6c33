//! Operator notices, shown as toasts that dismiss themselves.

use std::collections::HashSet;
use std::time::Duration;

use coax_client::{Notice, NoticeLevel};
use leptos::prelude::*;

use crate::provider::use_panel;

fn dismiss_after(level: NoticeLevel) -> Duration {
    match level {
        NoticeLevel::Error => Duration::from_secs(8),
        NoticeLevel::Success => Duration::from_secs(5),
    }
}

#[component]
pub fn NoticeStack() -> impl IntoView {
    let view = use_panel().view.signal();
    let scheduled = StoredValue::new(HashSet::<u64>::new());

    // each notice gets exactly one dismissal timer
    Effect::new(move |_| {
        let pending: Vec<(u64, NoticeLevel)> =
            view.with(|v| v.notices().map(|n| (n.id, n.level)).collect());
        for (id, level) in pending {
            let fresh = scheduled
                .try_update_value(|ids| ids.insert(id))
                .unwrap_or(false);
            if fresh {
                set_timeout(
                    move || view.update(|v| v.dismiss_notice(id)),
                    dismiss_after(level),
                );
            }
        }
    });

    view! {
        <div class="notices">
            {move || {
                view.with(|v| v.notices().cloned().collect::<Vec<_>>())
                    .into_iter()
                    .map(|notice| view! { <NoticeItem notice=notice/> })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

#[component]
fn NoticeItem(notice: Notice) -> impl IntoView {
    let view = use_panel().view.signal();
    let id = notice.id;
    let class = match notice.level {
        NoticeLevel::Success => "notice success",
        NoticeLevel::Error => "notice error",
    };

    view! {
        <div class=class role="alert">
            <span>{notice.message}</span>
            <button class="dismiss" on:click=move |_| view.update(|v| v.dismiss_notice(id))>
                "✕"
            </button>
        </div>
    }
}
