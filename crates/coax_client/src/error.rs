use coax_common::CommonError;
use thiserror::Error;

/// Errors that can occur while driving the panel.
#[derive(Debug, Error)]
pub enum PanelError {
    /// A response key or handler target has no matching element.
    ///
    /// Carries the selector that failed, e.g. `#voltage_gleeble` or
    /// `[name=backend]`.
    #[error("no element matches `{0}`")]
    MissingElement(String),

    /// A live message lacks a field the panel reads directly.
    #[error("message is missing field `{0}`")]
    MissingField(&'static str),

    /// A backend value could not be interpreted.
    #[error(transparent)]
    Value(#[from] CommonError),

    /// The HTTP request could not be completed.
    #[error("request to {path} failed: {message}")]
    Http { path: String, message: String },

    /// A GET returned a non-success status.
    #[error("{path} answered with status {status}")]
    HttpStatus { path: String, status: u16 },

    /// A body or socket message was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A body or socket message was valid JSON but not an object.
    #[error("expected a JSON object from {0}")]
    NotAnObject(String),

    /// No socket has been attached to the connection manager.
    #[error("websocket not initialized")]
    NotConnected,

    /// The socket closed; there is no reconnection.
    #[error("websocket closed")]
    SocketClosed,

    /// The socket refused an outgoing frame.
    #[error("websocket error: {0}")]
    Socket(String),

    /// The view model could not be reached (disposed or poisoned).
    #[error("view model unavailable")]
    ViewUnavailable,
}

pub type PanelResult<T> = Result<T, PanelError>;
