//! # Coax Common
//!
//! Vocabulary shared between the coax/cross panel and the device backend:
//! endpoint paths, the enumerations the backend reports, the rules for
//! turning JSON scalars into display text, and the text codec used for
//! manual position frames on the live socket.

pub mod codec;
pub mod error;
pub mod values;

pub use codec::{PositionCommand, PositionTextCodec};
pub use error::CommonError;
pub use values::{display_scalar, split_timestamp};

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A JSON object as delivered by the backend, keys in server order.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// REST paths served by the device backend.
pub mod endpoints {
    /// GET: current status snapshot.
    pub const REFRESH: &str = "/refresh";
    /// GET: config record. POST: replace it from a url-encoded form.
    pub const CONFIG: &str = "/config";
    /// GET: OPC-UA gateway node tree.
    pub const OPCUA: &str = "/opcua";
    /// POST: start the control loop.
    pub const START: &str = "/start";
    /// POST: stop the control loop.
    pub const STOP: &str = "/stop";
    /// Live status feed, relative to the socket host.
    pub const SOCKET: &str = "/ws";
    /// Port the live feed listens on.
    pub const SOCKET_PORT: u16 = 8080;
}

/// Field names with special meaning inside snapshots and config records.
pub mod fields {
    pub const TIMESTAMP: &str = "timestamp";
    pub const CONTROL_STATE: &str = "control_state";
    pub const POSITION_COAX: &str = "position_coax";
    pub const POSITION_CROSS: &str = "position_cross";
    pub const BACKEND: &str = "backend";
}

/// Operating state reported by the device.
///
/// Only `Stopped` is distinguished by the panel; every other state counts
/// as running for button visibility.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum ControlState {
    #[default]
    Stopped,
    Running,
    Error,
    Other(String),
}

impl ControlState {
    pub fn is_stopped(&self) -> bool {
        matches!(self, ControlState::Stopped)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ControlState::Stopped => "Stopped",
            ControlState::Running => "Running",
            ControlState::Error => "Error",
            ControlState::Other(s) => s,
        }
    }
}

impl From<&str> for ControlState {
    fn from(value: &str) -> Self {
        match value {
            "Stopped" => ControlState::Stopped,
            "Running" => ControlState::Running,
            "Error" => ControlState::Error,
            other => ControlState::Other(other.to_string()),
        }
    }
}

impl From<String> for ControlState {
    fn from(value: String) -> Self {
        ControlState::from(value.as_str())
    }
}

impl From<ControlState> for String {
    fn from(value: ControlState) -> Self {
        value.as_str().to_string()
    }
}

impl Display for ControlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Motion backend selected in the device configuration.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendMode {
    Zaber,
    Ramp,
    Manual,
}

impl BackendMode {
    pub const ALL: [BackendMode; 3] = [BackendMode::Zaber, BackendMode::Ramp, BackendMode::Manual];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Zaber => "Zaber",
            BackendMode::Ramp => "Ramp",
            BackendMode::Manual => "Manual",
        }
    }

    /// Exact, case-sensitive match on the backend's spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == name)
    }

    /// Operator-driven positioning; unlocks the manual position inputs.
    pub fn is_manual(&self) -> bool {
        matches!(self, BackendMode::Manual)
    }
}

impl Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two motion axes of the positioner.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Coax,
    Cross,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Coax, Axis::Cross];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Coax => "coax",
            Axis::Cross => "cross",
        }
    }
}

impl Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
