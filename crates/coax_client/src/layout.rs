//! The canonical panel layout.

use coax_common::{Axis, BackendMode, fields};

use crate::view::{Element, FieldKind, ViewModel};

/// Ids of the elements the handlers address directly.
pub mod ids {
    use coax_common::Axis;

    pub const CONFIG_FORM: &str = "form-config";
    pub const BTN_START: &str = "btn-start";
    pub const BTN_STOP: &str = "btn-stop";
    pub const UI_STATUS: &str = "ui-status";

    pub const POS_COAX: &str = "inp-pos-coax";
    pub const POS_CROSS: &str = "inp-pos-cross";
    pub const POS_MIN_COAX: &str = "inp-pos-min-coax";
    pub const POS_MAX_COAX: &str = "inp-pos-max-coax";
    pub const POS_MIN_CROSS: &str = "inp-pos-min-cross";
    pub const POS_MAX_CROSS: &str = "inp-pos-max-cross";
    pub const POS_TARGET_COAX: &str = "inp-pos-target-coax";
    pub const POS_TARGET_CROSS: &str = "inp-pos-target-cross";
    pub const POS_ACTUAL_COAX: &str = "inp-pos-actual-coax";
    pub const POS_ACTUAL_CROSS: &str = "inp-pos-actual-cross";

    /// Inputs unlocked only while the backend is `Manual`.
    pub const MANUAL_POSITION_INPUTS: [&str; 6] = [
        POS_COAX,
        POS_CROSS,
        POS_MIN_COAX,
        POS_MAX_COAX,
        POS_MIN_CROSS,
        POS_MAX_CROSS,
    ];

    pub fn slider(axis: Axis) -> &'static str {
        match axis {
            Axis::Coax => POS_COAX,
            Axis::Cross => POS_CROSS,
        }
    }

    pub fn target(axis: Axis) -> &'static str {
        match axis {
            Axis::Coax => POS_TARGET_COAX,
            Axis::Cross => POS_TARGET_CROSS,
        }
    }

    pub fn actual(axis: Axis) -> &'static str {
        match axis {
            Axis::Coax => POS_ACTUAL_COAX,
            Axis::Cross => POS_ACTUAL_CROSS,
        }
    }
}

/// Tab keys in display order.
pub mod tabs {
    pub const STATUS: &str = "status";
    pub const CONFIG: &str = "config";
    pub const OPCUA: &str = "opcua";
    pub const MANUAL: &str = "manual";
}

const STATUS_OUTPUTS: [(&str, &str); 8] = [
    ("voltage_gleeble", "Gleeble voltage [V]"),
    (fields::POSITION_COAX, "Coax position [mm]"),
    (fields::POSITION_CROSS, "Cross position [mm]"),
    ("busy_coax", "Coax busy"),
    ("busy_cross", "Cross busy"),
    (fields::CONTROL_STATE, "Control state"),
    ("error", "Error"),
    (fields::TIMESTAMP, "Timestamp"),
];

fn limit_input(axis: Axis, bound: &str) -> Element {
    let id = match (axis, bound) {
        (Axis::Coax, "min") => ids::POS_MIN_COAX,
        (Axis::Coax, _) => ids::POS_MAX_COAX,
        (Axis::Cross, "min") => ids::POS_MIN_CROSS,
        (Axis::Cross, _) => ids::POS_MAX_CROSS,
    };
    Element::field(
        FieldKind::Number,
        format!("position_{bound}_{axis}"),
        format!("{axis} {bound} [mm]"),
    )
    .with_id(id)
    .disabled()
}

impl ViewModel {
    /// The coax/cross control panel as served to the operator.
    pub fn panel() -> ViewModel {
        let mut builder = ViewModel::builder().tab(tabs::STATUS, "Status");
        for (id, label) in STATUS_OUTPUTS {
            builder = builder.element(Element::output(id, label));
        }
        builder = builder
            .element(Element::output(ids::UI_STATUS, "Connection").initial("disconnected"))
            .button(ids::BTN_START, "Start", false)
            .button(ids::BTN_STOP, "Stop", true);

        let backend_options = BackendMode::ALL
            .iter()
            .map(|mode| mode.as_str().to_string())
            .collect();
        builder = builder
            .tab(tabs::CONFIG, "Config")
            .begin_form(ids::CONFIG_FORM)
            .element(
                Element::field(FieldKind::Number, "cycle_time", "Cycle time [ms]")
                    .required()
                    .min(1.0),
            )
            .element(
                Element::field(FieldKind::Number, "restart_timeout", "Restart timeout [ms]")
                    .required()
                    .min(0.0),
            )
            .element(Element::field(FieldKind::Number, "voltage_min", "Voltage min [V]").required())
            .element(Element::field(FieldKind::Number, "voltage_max", "Voltage max [V]").required())
            .element(Element::field(FieldKind::Text, "serial_device", "Serial device").required())
            .element(
                Element::field(FieldKind::Text, "opcua_config_path", "OPC-UA config").required(),
            )
            .element(
                Element::field(FieldKind::Select(backend_options), fields::BACKEND, "Backend")
                    .required(),
            );
        for axis in Axis::BOTH {
            builder = builder
                .element(limit_input(axis, "min"))
                .element(limit_input(axis, "max"));
        }
        builder = builder.end_form();

        builder = builder
            .tab(tabs::OPCUA, "OPC-UA")
            .element(Element::field(FieldKind::Text, "application_name", "Application name").readonly())
            .element(Element::field(FieldKind::Text, "application_uri", "Application URI").readonly())
            .element(Element::field(FieldKind::Text, "product_uri", "Product URI").readonly())
            .element(
                Element::field(FieldKind::Text, "create_sample_keypair", "Sample keypair").readonly(),
            )
            .element(Element::field(FieldKind::Text, "pki_dir", "PKI directory").readonly())
            .begin_fieldset("tcp_config", "TCP")
            .element(Element::field(FieldKind::Text, "host", "Host").readonly())
            .element(Element::field(FieldKind::Number, "port", "Port").readonly())
            .element(Element::field(FieldKind::Number, "hello_timeout", "Hello timeout [s]").readonly())
            .end_fieldset()
            .begin_fieldset("limits", "Limits")
            .element(Element::field(FieldKind::Number, "max_subscriptions", "Subscriptions").readonly())
            .element(
                Element::field(FieldKind::Number, "max_monitored_items_per_sub", "Items per subscription")
                    .readonly(),
            )
            .element(Element::field(FieldKind::Number, "max_array_length", "Array length").readonly())
            .end_fieldset();

        builder = builder.tab(tabs::MANUAL, "Manual");
        for axis in Axis::BOTH {
            builder = builder
                .element(
                    Element::control(FieldKind::Range, ids::slider(axis), format!("{axis} position"))
                        .initial("0")
                        .disabled(),
                )
                .element(Element::output(ids::target(axis), format!("{axis} target [mm]")))
                .element(Element::output(ids::actual(axis), format!("{axis} actual [mm]")));
        }

        builder.build()
    }
}
