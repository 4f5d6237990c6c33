//! Panel context: the reactive view model, the controller and the live socket.

use std::future::Future;
use std::sync::Arc;

use codee::string::FromToStringCodec;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_use::{
    DummyEncoder, ReconnectLimit, UseWebSocketOptions, UseWebSocketReturn,
    use_websocket_with_options,
};

use coax_client::{
    ConnectionManager, PanelConfig, PanelController, PanelError, PanelResult, ReqwestApi,
    SocketLink, ViewModel, ViewStore,
};

pub type Controller = PanelController<ReqwestApi>;

/// The view model behind a signal, so every write re-renders what reads it.
#[derive(Clone, Copy)]
pub struct PanelView(RwSignal<ViewModel>);

impl PanelView {
    pub fn new(model: ViewModel) -> Self {
        Self(RwSignal::new(model))
    }

    pub fn signal(&self) -> RwSignal<ViewModel> {
        self.0
    }
}

impl ViewStore for PanelView {
    fn read_view<R>(&self, f: impl FnOnce(&ViewModel) -> R) -> PanelResult<R> {
        self.0.try_with_untracked(f).ok_or(PanelError::ViewUnavailable)
    }

    fn update_view<R>(&self, f: impl FnOnce(&mut ViewModel) -> R) -> PanelResult<R> {
        self.0.try_update(f).ok_or(PanelError::ViewUnavailable)
    }
}

/// Outgoing half of the leptos-use socket.
struct LeptosSocket {
    send: Arc<dyn Fn(&String) + Send + Sync>,
}

impl SocketLink for LeptosSocket {
    fn send_text(&self, text: String) -> PanelResult<()> {
        (self.send)(&text);
        Ok(())
    }
}

#[derive(Clone, Copy)]
pub struct PanelContext {
    pub view: PanelView,
    controller: StoredValue<Arc<Controller>, LocalStorage>,
}

impl PanelContext {
    pub fn controller(&self) -> Arc<Controller> {
        self.controller.get_value()
    }

    /// Run a synchronous handler, logging its error.
    pub fn handle(&self, label: &'static str, f: impl FnOnce(&Controller, &PanelView) -> PanelResult<()>) {
        let controller = self.controller();
        if let Err(err) = f(controller.as_ref(), &self.view) {
            log::error!("{label}: {err}");
        }
    }

    /// Spawn an async handler on the local executor, logging its error.
    pub fn spawn<F, Fut>(&self, label: &'static str, f: F)
    where
        F: FnOnce(Arc<Controller>, PanelView) -> Fut,
        Fut: Future<Output = PanelResult<()>> + 'static,
    {
        let task = f(self.controller(), self.view);
        spawn_local(async move {
            if let Err(err) = task.await {
                log::error!("{label}: {err}");
            }
        });
    }
}

pub fn use_panel() -> PanelContext {
    use_context::<PanelContext>().expect("PanelContext not found. Wrap your app in PanelProvider.")
}

/// Provider component that owns the panel state and the live socket.
///
/// The socket opens once on mount. After it closes the indicator stays at
/// `disconnected` until the page is reloaded.
#[component]
pub fn PanelProvider(config: PanelConfig, children: Children) -> impl IntoView {
    let view = PanelView::new(ViewModel::panel());
    let connection = Arc::new(ConnectionManager::new(config.ws_url.clone()));
    let controller = Arc::new(PanelController::new(
        ReqwestApi::new(config.base_url.clone()),
        connection.clone(),
    ));

    let on_open = connection.clone();
    let on_close = connection.clone();
    let on_message = connection.clone();
    log::info!("opening live socket {}", connection.url());
    let UseWebSocketReturn { send, .. } =
        use_websocket_with_options::<String, String, FromToStringCodec, (), DummyEncoder>(
            connection.url(),
            UseWebSocketOptions::default()
                .immediate(true)
                .reconnect_limit(ReconnectLimit::Limited(0))
                .on_open(move |_| {
                    if let Err(err) = on_open.handle_open(&view) {
                        log::error!("socket open: {err}");
                    }
                })
                .on_close(move |_| {
                    if let Err(err) = on_close.handle_close(&view) {
                        log::error!("socket close: {err}");
                    }
                })
                .on_error(move |e| {
                    log::warn!("socket error: {e:?}");
                })
                .on_message_raw(move |text: &str| {
                    if let Err(err) = on_message.handle_message(text, &view) {
                        log::error!("live update: {err}");
                    }
                }),
        );
    connection.attach(Arc::new(LeptosSocket {
        send: Arc::new(move |text: &String| send(text)),
    }));

    let ctx = PanelContext {
        view,
        controller: StoredValue::new_local(controller),
    };
    provide_context(ctx);

    ctx.spawn("initial load", |controller, view| async move {
        controller.initialize(&view).await
    });

    children()
}
