//! # Coax Client
//!
//! Core of the coax/cross control panel, independent of any live document.
//!
//! - [`ViewModel`] is the explicit panel document: values, flags, tabs and
//!   notices, with selector-style lookups that fail loudly.
//! - [`render`] turns backend JSON into view model writes.
//! - [`SyncClient`] wraps the REST endpoints over an injected [`HttpApi`].
//! - [`ConnectionManager`] owns the single live socket and its
//!   `Connecting → Open → Closed` lifecycle.
//! - [`PanelController`] is the set of event handlers the UI binds to.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::{Arc, Mutex};
//! use coax_client::{ConnectionManager, PanelConfig, PanelController, ReqwestApi, ViewModel};
//!
//! let config = PanelConfig::default();
//! let connection = Arc::new(ConnectionManager::new(config.ws_url.clone()));
//! let controller = PanelController::new(ReqwestApi::new(config.base_url), connection);
//! let view = Mutex::new(ViewModel::panel());
//!
//! controller.initialize(&view).await?;
//! controller.switch_tab(&view, "config")?;
//! ```

mod config;
mod connection;
mod controller;
mod error;
mod http;
pub mod layout;
pub mod render;
mod sync;
mod traits;
mod view;

pub use config::PanelConfig;
pub use connection::{ConnectionManager, ConnectionState};
pub use controller::{PanelController, SAVE_FAILED_NOTICE, SAVE_OK_NOTICE, SaveOutcome};
pub use error::{PanelError, PanelResult};
pub use http::ReqwestApi;
pub use layout::{ids, tabs};
pub use sync::SyncClient;
pub use traits::{HttpApi, ResponseStatus, SocketLink, ViewStore};
pub use view::{
    Button, Constraints, Element, FieldKind, Fieldset, InvalidField, Invalidity, Notice,
    NoticeLevel, Tab, ViewBuilder, ViewModel,
};

// Re-export the shared vocabulary for UI crates
pub use coax_common::{Axis, BackendMode, ControlState, JsonObject, PositionCommand};
