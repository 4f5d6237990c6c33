//! Render functions: backend data in, view model writes out.
//!
//! Each function takes the view model explicitly. A key with no matching
//! element is an error, and writes made before the failing key stay applied.

use coax_common::{Axis, BackendMode, ControlState, JsonObject, display_scalar, fields, split_timestamp};
use serde_json::Value;

use crate::connection::ConnectionState;
use crate::error::{PanelError, PanelResult};
use crate::layout::ids;
use crate::view::ViewModel;

fn status_text(key: &str, value: &Value) -> PanelResult<String> {
    if key == fields::TIMESTAMP {
        if let Value::String(raw) = value {
            return Ok(split_timestamp(raw)?);
        }
    }
    Ok(display_scalar(key, value)?)
}

/// Write every snapshot field into the element whose id is the field name.
pub fn render_status(view: &mut ViewModel, snapshot: &JsonObject) -> PanelResult<()> {
    for (key, value) in snapshot {
        let text = status_text(key, value)?;
        view.set_value(key, text)?;
    }
    Ok(())
}

/// Write every config value into the control whose name is the field name,
/// then apply the backend rule.
pub fn render_config(view: &mut ViewModel, record: &JsonObject) -> PanelResult<()> {
    for (key, value) in record {
        let text = display_scalar(key, value)?;
        view.named_mut(key)?.assign(text);
    }
    apply_backend_mode(view)
}

/// Enable the six manual position inputs when the backend select reads
/// `Manual`, disable them otherwise.
pub fn apply_backend_mode(view: &mut ViewModel) -> PanelResult<()> {
    let manual = BackendMode::from_name(view.named(fields::BACKEND)?.value())
        .is_some_and(|mode| mode.is_manual());
    for id in ids::MANUAL_POSITION_INPUTS {
        view.set_disabled(id, !manual)?;
    }
    Ok(())
}

/// Fill the OPC-UA section from a nested node tree.
///
/// Scalars go to the control named after the key. Objects, arrays and
/// `null` are groups: a group without a `fieldset#<key>` is skipped, as is
/// any sub-field without a matching input.
pub fn render_opcua(view: &mut ViewModel, tree: &JsonObject) -> PanelResult<()> {
    for (key, value) in tree {
        let entries: Vec<(String, &Value)> = match value {
            Value::Object(group) => group.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Value::Array(items) => items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
            Value::Null => Vec::new(),
            scalar => {
                let text = display_scalar(key, scalar)?;
                view.named_mut(key)?.assign(text);
                continue;
            }
        };

        if view.fieldset(key).is_none() {
            log::debug!("no fieldset for OPC-UA group `{key}`, skipping");
            continue;
        }
        for (name, sub) in entries {
            let Some(input) = view.fieldset_input_mut(key, &name) else {
                continue;
            };
            // nested containers are shown as their JSON text
            let text = match sub {
                Value::Array(_) | Value::Object(_) => sub.to_string(),
                scalar => display_scalar(&name, scalar)?,
            };
            input.assign(text);
        }
    }
    Ok(())
}

/// Apply one live status message.
///
/// Updates the same fields as [`render_status`], the two actual-position
/// displays, and start/stop visibility. Returns the reported control state.
pub fn render_live(view: &mut ViewModel, message: &JsonObject) -> PanelResult<ControlState> {
    render_status(view, message)?;

    for (axis, field) in [
        (Axis::Coax, fields::POSITION_COAX),
        (Axis::Cross, fields::POSITION_CROSS),
    ] {
        let value = message.get(field).ok_or(PanelError::MissingField(field))?;
        view.set_value(ids::actual(axis), display_scalar(field, value)?)?;
    }

    let state = match message.get(fields::CONTROL_STATE) {
        Some(Value::String(s)) => ControlState::from(s.as_str()),
        Some(other) => ControlState::Other(display_scalar(fields::CONTROL_STATE, other)?),
        None => ControlState::Other(String::new()),
    };
    let stopped = state.is_stopped();
    view.set_button_hidden(ids::BTN_START, !stopped)?;
    view.set_button_hidden(ids::BTN_STOP, stopped)?;
    Ok(state)
}

/// Show the connection indicator for `state`.
pub fn render_connection(view: &mut ViewModel, state: ConnectionState) -> PanelResult<()> {
    view.set_value(ids::UI_STATUS, state.indicator())
}

/// Copy a slider's value into its target display.
pub fn mirror_slider(view: &mut ViewModel, axis: Axis) -> PanelResult<()> {
    let value = view.value(ids::slider(axis))?.to_string();
    view.set_value(ids::target(axis), value)
}
