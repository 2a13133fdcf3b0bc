//! HTTP Client
//!
//! reqwest implementation of [`BackendApi`].

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::{check_status, decode};
use super::{
    BackendApi, BillingSummary, ChatReply, ChatRequest, Endpoints, FetchError, FetchResult,
    LimitsSummary,
};

/// Backend client over HTTP
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpApi {
    /// Create a client without a request timeout
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            client: Client::new(),
            endpoints,
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(endpoints: Endpoints, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> FetchResult<T> {
        check_status(response.status().as_u16())?;
        let body = response.text().await?;
        decode(&body)
    }
}

#[async_trait(?Send)]
impl BackendApi for HttpApi {
    async fn limits_summary(&self, year: i32, user_id: u64) -> FetchResult<LimitsSummary> {
        let url = self.endpoints.limits_summary(year, user_id);
        tracing::debug!(%url, "GET limits summary");

        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    async fn billing_summary(&self, user_id: u64) -> FetchResult<BillingSummary> {
        let url = self.endpoints.billing_me(user_id);
        tracing::debug!(%url, "GET billing summary");

        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    async fn chat(&self, request: &ChatRequest) -> FetchResult<ChatReply> {
        let url = self.endpoints.assistant_chat();
        tracing::debug!(%url, user_id = request.user_id, "POST assistant chat");

        let response = self.client.post(&url).json(request).send().await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_endpoints() {
        let api = HttpApi::new(Endpoints::single("http://localhost:9000/"));
        assert_eq!(api.endpoints().assistant_base(), "http://localhost:9000");
    }

    #[test]
    fn test_with_timeout_builds() {
        let api = HttpApi::with_timeout(Endpoints::default(), Duration::from_secs(5));
        assert!(api.is_ok());
    }
}
