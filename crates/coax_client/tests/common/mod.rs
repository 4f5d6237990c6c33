#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use coax_client::{
    ConnectionManager, HttpApi, JsonObject, PanelController, PanelError, PanelResult,
    ResponseStatus, SocketLink, ViewModel,
};
use serde_json::Value;

/// A request the fake backend received.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Get(String),
    PostForm(String, Vec<(String, String)>),
    Post(String),
}

/// In-memory backend: canned GET bodies and POST statuses, every call logged.
#[derive(Default)]
pub struct FakeApi {
    pub calls: RefCell<Vec<Call>>,
    bodies: RefCell<HashMap<String, JsonObject>>,
    post_status: RefCell<HashMap<String, u16>>,
    unreachable: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn serve(&self, path: &str, body: Value) {
        let Value::Object(map) = body else {
            panic!("fake bodies must be objects");
        };
        self.bodies.borrow_mut().insert(path.to_string(), map);
    }

    pub fn answer_post(&self, path: &str, status: u16) {
        self.post_status.borrow_mut().insert(path.to_string(), status);
    }

    /// Every request to `path` fails at the transport level.
    pub fn cut(&self, path: &str) {
        self.unreachable.borrow_mut().push(path.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn check_reachable(&self, path: &str) -> PanelResult<()> {
        if self.unreachable.borrow().iter().any(|p| p == path) {
            return Err(PanelError::Http {
                path: path.to_string(),
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }

    fn status_for(&self, path: &str) -> ResponseStatus {
        ResponseStatus(self.post_status.borrow().get(path).copied().unwrap_or(200))
    }
}

#[async_trait(?Send)]
impl HttpApi for FakeApi {
    async fn get_json(&self, path: &str) -> PanelResult<JsonObject> {
        self.calls.borrow_mut().push(Call::Get(path.to_string()));
        self.check_reachable(path)?;
        self.bodies
            .borrow()
            .get(path)
            .cloned()
            .ok_or(PanelError::HttpStatus {
                path: path.to_string(),
                status: 404,
            })
    }

    async fn post_form(&self, path: &str, form: &[(String, String)]) -> PanelResult<ResponseStatus> {
        self.calls
            .borrow_mut()
            .push(Call::PostForm(path.to_string(), form.to_vec()));
        self.check_reachable(path)?;
        Ok(self.status_for(path))
    }

    async fn post_empty(&self, path: &str) -> PanelResult<ResponseStatus> {
        self.calls.borrow_mut().push(Call::Post(path.to_string()));
        self.check_reachable(path)?;
        Ok(self.status_for(path))
    }
}

#[derive(Default)]
pub struct RecordingLink {
    pub frames: Mutex<Vec<String>>,
}

impl SocketLink for RecordingLink {
    fn send_text(&self, text: String) -> PanelResult<()> {
        self.frames.lock().unwrap().push(text);
        Ok(())
    }
}

pub struct Harness {
    pub controller: PanelController<FakeApi>,
    pub view: Mutex<ViewModel>,
    pub link: Arc<RecordingLink>,
}

impl Harness {
    pub fn new() -> Self {
        let connection = Arc::new(ConnectionManager::new("ws://localhost:8080/ws"));
        let link = Arc::new(RecordingLink::default());
        connection.attach(link.clone());
        Self {
            controller: PanelController::new(FakeApi::default(), connection),
            view: Mutex::new(ViewModel::panel()),
            link,
        }
    }

    pub fn api(&self) -> &FakeApi {
        self.controller.client().api()
    }

    pub fn view(&self) -> std::sync::MutexGuard<'_, ViewModel> {
        self.view.lock().unwrap()
    }

    pub fn config_record() -> Value {
        serde_json::json!({
            "cycle_time": 1000,
            "restart_timeout": 10000,
            "voltage_min": 5.0,
            "voltage_max": 100.0,
            "serial_device": "/dev/ttyACM0",
            "opcua_config_path": "opcua_config.conf",
            "backend": "Ramp",
        })
    }
}
