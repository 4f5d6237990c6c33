use std::sync::Mutex;

use async_trait::async_trait;
use coax_common::JsonObject;

use crate::error::{PanelError, PanelResult};
use crate::view::ViewModel;

/// Status code of a completed POST.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResponseStatus(pub u16);

impl ResponseStatus {
    /// True for 2xx, the same test `fetch` uses for `Response.ok`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }
}

/// HTTP transport to the device backend.
///
/// Paths are the constants in [`coax_common::endpoints`]. Implementations
/// resolve them against their own base URL. Futures are not `Send`: the
/// panel runs on a single-threaded event loop.
#[async_trait(?Send)]
pub trait HttpApi {
    /// GET `path` and decode the body as a JSON object.
    ///
    /// A non-2xx status is an error.
    async fn get_json(&self, path: &str) -> PanelResult<JsonObject>;

    /// POST `form` url-encoded to `path`, returning the status whatever it is.
    async fn post_form(&self, path: &str, form: &[(String, String)]) -> PanelResult<ResponseStatus>;

    /// POST with an empty body, returning the status whatever it is.
    async fn post_empty(&self, path: &str) -> PanelResult<ResponseStatus>;
}

/// Outgoing half of the live socket.
pub trait SocketLink: Send + Sync {
    fn send_text(&self, text: String) -> PanelResult<()>;
}

/// Access to the view model the handlers render into.
///
/// Handlers never hold the view across an `.await`; each access is a short
/// closure, so the last write wins.
pub trait ViewStore {
    fn read_view<R>(&self, f: impl FnOnce(&ViewModel) -> R) -> PanelResult<R>;
    fn update_view<R>(&self, f: impl FnOnce(&mut ViewModel) -> R) -> PanelResult<R>;
}

impl ViewStore for Mutex<ViewModel> {
    fn read_view<R>(&self, f: impl FnOnce(&ViewModel) -> R) -> PanelResult<R> {
        let guard = self.lock().map_err(|_| PanelError::ViewUnavailable)?;
        Ok(f(&guard))
    }

    fn update_view<R>(&self, f: impl FnOnce(&mut ViewModel) -> R) -> PanelResult<R> {
        let mut guard = self.lock().map_err(|_| PanelError::ViewUnavailable)?;
        Ok(f(&mut guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_status_success_range() {
        assert!(ResponseStatus(200).is_success());
        assert!(ResponseStatus(204).is_success());
        assert!(!ResponseStatus(199).is_success());
        assert!(!ResponseStatus(300).is_success());
        assert!(!ResponseStatus(500).is_success());
    }

    #[test]
    fn test_mutex_view_store_roundtrip() {
        let store = Mutex::new(ViewModel::panel());
        store
            .update_view(|view| view.switch_tab("manual"))
            .unwrap()
            .unwrap();
        let active = store.read_view(|view| view.active_tab().to_string()).unwrap();
        assert_eq!(active, "manual");
    }
}
