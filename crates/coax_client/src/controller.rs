//! Panel event handlers.
//!
//! Every handler takes the view explicitly and returns a `Result`, so a
//! caller can await handlers one after another and inspect the view in
//! between. Nothing is cached here beyond the injected connection manager.

use std::sync::Arc;

use coax_common::{Axis, PositionCommand};

use crate::connection::ConnectionManager;
use crate::error::PanelResult;
use crate::layout::ids;
use crate::render;
use crate::sync::SyncClient;
use crate::traits::{HttpApi, ResponseStatus, ViewStore};
use crate::view::{InvalidField, NoticeLevel};

pub const SAVE_OK_NOTICE: &str = "New config loaded";
pub const SAVE_FAILED_NOTICE: &str = "Error while loading new config";

/// Result of a config save attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum SaveOutcome {
    /// The form failed validation; nothing was sent.
    Invalid(Vec<InvalidField>),
    /// The backend accepted the config.
    Saved,
    /// The backend answered with a non-2xx status.
    Rejected(ResponseStatus),
}

pub struct PanelController<A> {
    client: SyncClient<A>,
    connection: Arc<ConnectionManager>,
}

impl<A: HttpApi> PanelController<A> {
    pub fn new(api: A, connection: Arc<ConnectionManager>) -> Self {
        Self {
            client: SyncClient::new(api),
            connection,
        }
    }

    pub fn client(&self) -> &SyncClient<A> {
        &self.client
    }

    pub fn connection(&self) -> &Arc<ConnectionManager> {
        &self.connection
    }

    /// Page start: refresh, config load and OPC-UA load, each attempted
    /// regardless of the others. The first error is returned.
    pub async fn initialize(&self, view: &impl ViewStore) -> PanelResult<()> {
        let refresh = self.refresh(view).await;
        let config = self.load_config(view).await;
        let opcua = self.load_opcua(view).await;
        refresh.and(config).and(opcua)
    }

    /// Fetch the status snapshot and write it into the status displays.
    pub async fn refresh(&self, view: &impl ViewStore) -> PanelResult<()> {
        let snapshot = self.client.fetch_status().await?;
        view.update_view(|v| render::render_status(v, &snapshot))?
    }

    /// Fetch the config record into the config form.
    pub async fn load_config(&self, view: &impl ViewStore) -> PanelResult<()> {
        let record = self.client.fetch_config().await?;
        view.update_view(|v| render::render_config(v, &record))?
    }

    /// Fetch the OPC-UA node tree into its section.
    pub async fn load_opcua(&self, view: &impl ViewStore) -> PanelResult<()> {
        let tree = self.client.fetch_opcua().await?;
        view.update_view(|v| render::render_opcua(v, &tree))?
    }

    /// Validate and submit the config form, then reload it from the backend
    /// whatever the outcome and tell the operator how it went.
    pub async fn save_config(&self, view: &impl ViewStore) -> PanelResult<SaveOutcome> {
        let (invalid, form) = view.read_view(|v| {
            (
                v.form_validity(ids::CONFIG_FORM),
                v.form_data(ids::CONFIG_FORM),
            )
        })?;
        if !invalid.is_empty() {
            log::debug!("config form invalid: {invalid:?}");
            return Ok(SaveOutcome::Invalid(invalid));
        }

        let submitted = self.client.submit_config(&form).await;
        let reloaded = self.load_config(view).await;

        let outcome = match submitted {
            Ok(status) if status.is_success() => SaveOutcome::Saved,
            Ok(status) => SaveOutcome::Rejected(status),
            Err(err) => {
                view.update_view(|v| v.notify(NoticeLevel::Error, SAVE_FAILED_NOTICE))?;
                if let Err(reload_err) = reloaded {
                    log::error!("config reload after failed save: {reload_err}");
                }
                return Err(err);
            }
        };
        let (level, message) = match &outcome {
            SaveOutcome::Saved => (NoticeLevel::Success, SAVE_OK_NOTICE),
            _ => (NoticeLevel::Error, SAVE_FAILED_NOTICE),
        };
        view.update_view(|v| v.notify(level, message))?;
        reloaded?;
        Ok(outcome)
    }

    /// Start the control loop, then refresh status regardless.
    pub async fn start(&self, view: &impl ViewStore) -> PanelResult<()> {
        let sent = self.client.start().await;
        self.after_command("start", sent, view).await
    }

    /// Stop the control loop, then refresh status regardless.
    pub async fn stop(&self, view: &impl ViewStore) -> PanelResult<()> {
        let sent = self.client.stop().await;
        self.after_command("stop", sent, view).await
    }

    async fn after_command(
        &self,
        command: &str,
        sent: PanelResult<ResponseStatus>,
        view: &impl ViewStore,
    ) -> PanelResult<()> {
        if let Ok(status) = &sent {
            if !status.is_success() {
                log::warn!("{command} answered with status {}", status.0);
            }
        }
        let refreshed = self.refresh(view).await;
        sent?;
        refreshed
    }

    /// Move the active/visible marker pair to the tab `key`.
    pub fn switch_tab(&self, view: &impl ViewStore, key: &str) -> PanelResult<()> {
        view.update_view(|v| v.switch_tab(key))?
    }

    /// The operator picked a backend in the config form.
    pub fn select_backend(&self, view: &impl ViewStore, value: &str) -> PanelResult<()> {
        view.update_view(|v| {
            v.named_mut(coax_common::fields::BACKEND)?.assign(value);
            render::apply_backend_mode(v)
        })?
    }

    /// A select changed. Only the backend select drives the backend rule.
    pub fn select_input(&self, view: &impl ViewStore, name: &str, value: &str) -> PanelResult<()> {
        if name == coax_common::fields::BACKEND {
            return self.select_backend(view, value);
        }
        view.update_view(|v| v.named_mut(name).map(|e| e.assign(value)))?
    }

    /// A slider moved: store its value and mirror it into the target display.
    pub fn slider_input(&self, view: &impl ViewStore, axis: Axis, value: &str) -> PanelResult<()> {
        view.update_view(|v| {
            v.set_value(ids::slider(axis), value)?;
            render::mirror_slider(v, axis)
        })?
    }

    /// A slider was released: send both axis positions over the socket.
    pub fn slider_release(&self, view: &impl ViewStore) -> PanelResult<()> {
        let command = view.read_view(|v| -> PanelResult<PositionCommand> {
            Ok(PositionCommand::from_inputs(
                v.value(ids::POS_COAX)?,
                v.value(ids::POS_CROSS)?,
            )?)
        })??;
        self.connection.send_positions(&command)
    }
}
