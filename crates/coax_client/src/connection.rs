//! Ownership of the single live socket.

use std::sync::{Arc, Mutex, MutexGuard};

use codee::Encoder;
use coax_common::{JsonObject, PositionCommand, PositionTextCodec};

use crate::error::{PanelError, PanelResult};
use crate::render;
use crate::traits::{SocketLink, ViewStore};

/// Client-visible lifecycle of the live socket.
///
/// `Closed` is terminal: there is no reconnection until the page reloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Open,
    Closed,
}

impl ConnectionState {
    /// Text of the `#ui-status` indicator.
    pub fn indicator(&self) -> &'static str {
        match self {
            ConnectionState::Open => "connected",
            ConnectionState::Connecting | ConnectionState::Closed => "disconnected",
        }
    }
}

#[derive(Default)]
struct Inner {
    link: Option<Arc<dyn SocketLink>>,
    state: ConnectionState,
}

/// Owns the one optional live connection and routes its events into the view.
///
/// Handlers receive the manager instead of reaching for a global socket.
pub struct ConnectionManager {
    url: String,
    inner: Mutex<Inner>,
}

impl ConnectionManager {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        // state stays consistent even if a holder panicked
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Hand over the outgoing half of a freshly created socket.
    pub fn attach(&self, link: Arc<dyn SocketLink>) {
        self.inner().link = Some(link);
    }

    pub fn state(&self) -> ConnectionState {
        self.inner().state
    }

    /// Socket `open` event.
    pub fn handle_open(&self, view: &impl ViewStore) -> PanelResult<()> {
        let state = {
            let mut inner = self.inner();
            if inner.state == ConnectionState::Closed {
                log::warn!("ignoring open event on closed connection to {}", self.url);
                return Ok(());
            }
            inner.state = ConnectionState::Open;
            inner.state
        };
        log::info!("connected to {}", self.url);
        view.update_view(|v| render::render_connection(v, state))?
    }

    /// Socket `close` event. Network failures end up here too.
    pub fn handle_close(&self, view: &impl ViewStore) -> PanelResult<()> {
        self.inner().state = ConnectionState::Closed;
        log::info!("disconnected from {}", self.url);
        view.update_view(|v| render::render_connection(v, ConnectionState::Closed))?
    }

    /// Socket `message` event carrying a JSON status snapshot.
    pub fn handle_message(&self, text: &str, view: &impl ViewStore) -> PanelResult<()> {
        let message: JsonObject = match serde_json::from_str(text)? {
            serde_json::Value::Object(map) => map,
            _ => return Err(PanelError::NotAnObject(self.url.clone())),
        };
        view.update_view(|v| render::render_live(v, &message))??;
        Ok(())
    }

    /// Send both axis positions as one `"<coax> <cross>"` text frame.
    pub fn send_positions(&self, command: &PositionCommand) -> PanelResult<()> {
        let link = {
            let inner = self.inner();
            debug_assert!(inner.link.is_some(), "websocket not initialized");
            if inner.state == ConnectionState::Closed {
                return Err(PanelError::SocketClosed);
            }
            inner.link.clone().ok_or(PanelError::NotConnected)?
        };
        let frame = PositionTextCodec::encode(command)?;
        log::debug!("sending position frame {frame:?}");
        link.send_text(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ids;
    use crate::view::ViewModel;

    #[derive(Default)]
    struct RecordingLink {
        frames: Mutex<Vec<String>>,
    }

    impl SocketLink for RecordingLink {
        fn send_text(&self, text: String) -> PanelResult<()> {
            self.frames.lock().unwrap().push(text);
            Ok(())
        }
    }

    fn indicator(view: &Mutex<ViewModel>) -> String {
        view.read_view(|v| v.value(ids::UI_STATUS).unwrap().to_string())
            .unwrap()
    }

    #[test]
    fn test_indicator_follows_open_and_close() {
        let view = Mutex::new(ViewModel::panel());
        let manager = ConnectionManager::new("ws://localhost:8080/ws");
        assert_eq!(manager.url(), "ws://localhost:8080/ws");
        assert_eq!(indicator(&view), "disconnected");

        manager.handle_open(&view).unwrap();
        assert_eq!(manager.state(), ConnectionState::Open);
        assert_eq!(indicator(&view), "connected");

        manager.handle_close(&view).unwrap();
        assert_eq!(indicator(&view), "disconnected");
    }

    #[test]
    fn test_closed_is_terminal() {
        let view = Mutex::new(ViewModel::panel());
        let manager = ConnectionManager::new("ws://localhost:8080/ws");
        manager.handle_open(&view).unwrap();
        manager.handle_close(&view).unwrap();
        manager.handle_open(&view).unwrap();
        assert_eq!(manager.state(), ConnectionState::Closed);
        assert_eq!(indicator(&view), "disconnected");
    }

    #[test]
    fn test_send_positions_frames_text() {
        let manager = ConnectionManager::new("ws://localhost:8080/ws");
        let link = Arc::new(RecordingLink::default());
        manager.attach(link.clone());
        manager
            .send_positions(&PositionCommand::new(10.0, 20.0))
            .unwrap();
        assert_eq!(*link.frames.lock().unwrap(), vec!["10 20".to_string()]);
    }

    #[test]
    fn test_send_after_close_is_refused() {
        let view = Mutex::new(ViewModel::panel());
        let manager = ConnectionManager::new("ws://localhost:8080/ws");
        let link = Arc::new(RecordingLink::default());
        manager.attach(link.clone());
        manager.handle_close(&view).unwrap();
        let err = manager
            .send_positions(&PositionCommand::new(1.0, 2.0))
            .unwrap_err();
        assert!(matches!(err, PanelError::SocketClosed));
        assert!(link.frames.lock().unwrap().is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "websocket not initialized")]
    fn test_send_without_socket_asserts_in_debug() {
        let manager = ConnectionManager::new("ws://localhost:8080/ws");
        let _ = manager.send_positions(&PositionCommand::new(1.0, 2.0));
    }

    #[test]
    fn test_message_updates_view() {
        let view = Mutex::new(ViewModel::panel());
        let manager = ConnectionManager::new("ws://localhost:8080/ws");
        manager
            .handle_message(
                r#"{"position_coax": 3, "position_cross": 4, "control_state": "Running"}"#,
                &view,
            )
            .unwrap();
        let (start_hidden, actual) = view
            .read_view(|v| {
                (
                    v.button(ids::BTN_START).unwrap().hidden,
                    v.value(ids::POS_ACTUAL_COAX).unwrap().to_string(),
                )
            })
            .unwrap();
        assert!(start_hidden);
        assert_eq!(actual, "3");
    }

    #[test]
    fn test_message_must_be_object() {
        let view = Mutex::new(ViewModel::panel());
        let manager = ConnectionManager::new("ws://localhost:8080/ws");
        assert!(matches!(
            manager.handle_message("[1, 2]", &view),
            Err(PanelError::NotAnObject(_))
        ));
        assert!(matches!(
            manager.handle_message("not json", &view),
            Err(PanelError::Json(_))
        ));
    }
}
