//! Form controls bound to view model elements.

use coax_client::{Axis, Element, FieldKind, ids};
use leptos::prelude::*;

use crate::provider::use_panel;

/// Every element of `section` that sits outside a fieldset.
#[component]
pub fn FieldList(section: &'static str) -> impl IntoView {
    let indices: Vec<usize> = use_panel().view.signal().with_untracked(|v| {
        v.elements_in(section)
            .filter(|(_, e)| e.fieldset.is_none())
            .map(|(i, _)| i)
            .collect()
    });

    view! {
        <div class="fields">
            {indices.into_iter().map(|index| view! { <FieldRow index=index/> }).collect::<Vec<_>>()}
        </div>
    }
}

/// A `fieldset#id` with its grouped inputs.
#[component]
pub fn FieldsetBlock(id: String) -> impl IntoView {
    let view = use_panel().view.signal();
    let (legend, indices) = view.with_untracked(|v| {
        let legend = v.fieldset(&id).map(|f| f.legend.clone()).unwrap_or_default();
        let indices: Vec<usize> = v
            .elements()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.fieldset.as_deref() == Some(id.as_str()))
            .map(|(i, _)| i)
            .collect();
        (legend, indices)
    });

    view! {
        <fieldset id=id>
            <legend>{legend}</legend>
            {indices.into_iter().map(|index| view! { <FieldRow index=index/> }).collect::<Vec<_>>()}
        </fieldset>
    }
}

fn slider_axis(element: &Element) -> Option<Axis> {
    Axis::BOTH
        .into_iter()
        .find(|axis| element.id.as_deref() == Some(ids::slider(*axis)))
}

/// One labelled control. Structure is fixed at mount; value and
/// disabled state follow the view model.
#[component]
fn FieldRow(index: usize) -> impl IntoView {
    let ctx = use_panel();
    let view = ctx.view.signal();
    let Some(element) = view.with_untracked(|v| v.element_at(index).cloned()) else {
        log::warn!("no element at index {index}");
        return ().into_any();
    };

    let value = move || {
        view.with(|v| v.element_at(index).map(|e| e.value().to_string()))
            .unwrap_or_default()
    };
    let disabled = move || view.with(|v| v.element_at(index).is_some_and(|e| e.disabled));
    let hidden = move || view.with(|v| v.element_at(index).is_some_and(|e| e.hidden));
    let store = move |text: String| {
        view.update(|v| {
            if let Some(e) = v.element_at_mut(index) {
                e.assign(text);
            }
        })
    };

    let Element {
        id,
        name,
        label,
        kind,
        readonly,
        constraints,
        ..
    } = element.clone();
    let min = constraints.min.map(|m| m.to_string());
    let max = constraints.max.map(|m| m.to_string());
    let input_type = if kind == FieldKind::Number { "number" } else { "text" };

    let control = match kind {
        FieldKind::Output => view! { <output id=id>{value}</output> }.into_any(),
        FieldKind::Select(options) => {
            let select_name = name.clone().unwrap_or_default();
            view! {
                <select
                    id=id
                    name=name
                    required=constraints.required
                    prop:value=value
                    disabled=disabled
                    on:change=move |ev| {
                        let picked = event_target_value(&ev);
                        ctx.handle("select", |c, v| c.select_input(v, &select_name, &picked));
                    }
                >
                    <option value="">"--"</option>
                    {options.into_iter().map(|o| view! { <option value=o.clone()>{o.clone()}</option> }).collect::<Vec<_>>()}
                </select>
            }
            .into_any()
        }
        FieldKind::Range => match slider_axis(&element) {
            Some(axis) => view! {
                <input
                    type="range"
                    id=id
                    name=name
                    min=min
                    max=max
                    prop:value=value
                    disabled=disabled
                    on:input=move |ev| {
                        let moved = event_target_value(&ev);
                        ctx.handle("slider input", |c, v| c.slider_input(v, axis, &moved));
                    }
                    on:pointerup=move |_| ctx.handle("slider release", |c, v| c.slider_release(v))
                />
            }
            .into_any(),
            None => view! {
                <input
                    type="range"
                    id=id
                    name=name
                    min=min
                    max=max
                    prop:value=value
                    disabled=disabled
                    on:input=move |ev| store(event_target_value(&ev))
                />
            }
            .into_any(),
        },
        FieldKind::Text | FieldKind::Number => {
            view! {
                <input
                    type=input_type
                    id=id
                    name=name
                    min=min
                    max=max
                    step="any"
                    required=constraints.required
                    readonly=readonly
                    prop:value=value
                    disabled=disabled
                    on:input=move |ev| store(event_target_value(&ev))
                />
            }
            .into_any()
        }
    };

    view! {
        <label class="field" hidden=hidden>
            <span>{label}</span>
            {control}
        </label>
    }
    .into_any()
}
