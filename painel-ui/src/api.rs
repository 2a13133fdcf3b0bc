//! HTTP API Client
//!
//! gloo-net implementation of the dashboard's backend port.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use painel::api::error::{check_status, decode};
use painel::{
    BackendApi, BillingSummary, ChatReply, ChatRequest, Config, Endpoints, FetchError, FetchResult,
    LimitsSummary,
};

/// Local storage key that points every service at one base URL
pub const API_BASE_KEY: &str = "painel_api_url";

/// Configuration for the browser
///
/// Defaults, then any `PAINEL_*` keys found in local storage, then the
/// single base URL under [`API_BASE_KEY`].
pub fn load_config() -> Config {
    let mut config = Config::default();
    config.apply_overrides(storage_item);

    if let Some(base) = storage_item(API_BASE_KEY) {
        let base = base.trim_end_matches('/').to_string();
        config.api.limits_url = base.clone();
        config.api.billing_url = base.clone();
        config.api.assistant_url = base;
    }
    config
}

fn storage_item(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(key).ok()?
}

/// Backend client over `fetch`
pub struct GlooApi {
    endpoints: Endpoints,
}

impl GlooApi {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }
}

fn network(err: gloo_net::Error) -> FetchError {
    FetchError::Network(err.to_string())
}

async fn read_json<T: DeserializeOwned>(
    response: Result<Response, gloo_net::Error>,
) -> FetchResult<T> {
    let response = response.map_err(network)?;
    check_status(response.status())?;
    let body = response.text().await.map_err(network)?;
    decode(&body)
}

#[async_trait(?Send)]
impl BackendApi for GlooApi {
    async fn limits_summary(&self, year: i32, user_id: u64) -> FetchResult<LimitsSummary> {
        let url = self.endpoints.limits_summary(year, user_id);
        tracing::debug!(%url, "GET");
        read_json(Request::get(&url).send().await).await
    }

    async fn billing_summary(&self, user_id: u64) -> FetchResult<BillingSummary> {
        let url = self.endpoints.billing_me(user_id);
        tracing::debug!(%url, "GET");
        read_json(Request::get(&url).send().await).await
    }

    async fn chat(&self, request: &ChatRequest) -> FetchResult<ChatReply> {
        let url = self.endpoints.assistant_chat();
        tracing::debug!(%url, "POST");
        let request = Request::post(&url).json(request).map_err(network)?;
        read_json(request.send().await).await
    }
}
