//! One-shot REST calls against the device backend.

use coax_common::{JsonObject, endpoints};

use crate::error::PanelResult;
use crate::traits::{HttpApi, ResponseStatus};

/// Typed wrapper over an [`HttpApi`] for the backend's endpoints.
pub struct SyncClient<A> {
    api: A,
}

impl<A: HttpApi> SyncClient<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// GET `/refresh`: the current status snapshot.
    pub async fn fetch_status(&self) -> PanelResult<JsonObject> {
        log::debug!("GET {}", endpoints::REFRESH);
        self.api.get_json(endpoints::REFRESH).await
    }

    /// GET `/config`: the backend's authoritative config record.
    pub async fn fetch_config(&self) -> PanelResult<JsonObject> {
        log::debug!("GET {}", endpoints::CONFIG);
        self.api.get_json(endpoints::CONFIG).await
    }

    /// POST `/config` with the url-encoded form.
    pub async fn submit_config(&self, form: &[(String, String)]) -> PanelResult<ResponseStatus> {
        log::debug!("POST {} ({} fields)", endpoints::CONFIG, form.len());
        self.api.post_form(endpoints::CONFIG, form).await
    }

    /// GET `/opcua`: the gateway node tree.
    pub async fn fetch_opcua(&self) -> PanelResult<JsonObject> {
        log::debug!("GET {}", endpoints::OPCUA);
        self.api.get_json(endpoints::OPCUA).await
    }

    /// POST `/start`.
    pub async fn start(&self) -> PanelResult<ResponseStatus> {
        log::debug!("POST {}", endpoints::START);
        self.api.post_empty(endpoints::START).await
    }

    /// POST `/stop`.
    pub async fn stop(&self) -> PanelResult<ResponseStatus> {
        log::debug!("POST {}", endpoints::STOP);
        self.api.post_empty(endpoints::STOP).await
    }
}
