//! Backend API
//!
//! The three HTTP/JSON services the dashboard reads from.
//!
//! # Endpoints
//!
//! - `GET /limits/summary?year={yyyy}&user_id={id}` - revenue and MEI limit
//! - `GET /billing/me?user_id={id}` - plan and usage
//! - `POST /assistant/chat` - assistant reply and token usage
//!
//! Calls go through the [`BackendApi`] port so the panels can be driven by
//! reqwest natively, gloo-net in the browser, or a stub in tests. One call
//! is one request: no retries, no caching.

pub mod dto;
pub mod endpoints;
pub mod error;

#[cfg(feature = "native")]
pub mod client;

use async_trait::async_trait;

pub use dto::{BillingSummary, ChatReply, ChatRequest, LimitsSummary, PlanInfo, UsageInfo};
pub use endpoints::Endpoints;
pub use error::{FetchError, FetchResult};

#[cfg(feature = "native")]
pub use client::HttpApi;

/// Port to the limits, billing and assistant services
///
/// Futures are not `Send`: the dashboard runs on a single-threaded event
/// loop in every host.
#[async_trait(?Send)]
pub trait BackendApi {
    /// Revenue summary for `year`
    async fn limits_summary(&self, year: i32, user_id: u64) -> FetchResult<LimitsSummary>;

    /// Current plan and usage
    async fn billing_summary(&self, user_id: u64) -> FetchResult<BillingSummary>;

    /// Send one chat message to the assistant
    async fn chat(&self, request: &ChatRequest) -> FetchResult<ChatReply>;
}
