//! Scripted backend for unit tests

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::sync::Notify;

use crate::api::{
    BackendApi, BillingSummary, ChatReply, ChatRequest, FetchError, FetchResult, LimitsSummary,
    PlanInfo, UsageInfo,
};

/// A call the stub received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Limits { year: i32, user_id: u64 },
    Billing { user_id: u64 },
    Chat(ChatRequest),
}

/// Backend answering every call from a fixed script
pub struct StubApi {
    pub limits: RefCell<FetchResult<LimitsSummary>>,
    pub billing: RefCell<FetchResult<BillingSummary>>,
    pub chat: RefCell<FetchResult<ChatReply>>,
    /// Each billing call takes the next gate and waits for a permit on it
    billing_gates: RefCell<VecDeque<Rc<Notify>>>,
    calls: RefCell<Vec<Call>>,
}

fn down<T>() -> FetchResult<T> {
    Err(FetchError::Network("connection refused".to_string()))
}

impl StubApi {
    /// Every endpoint fails with a network error
    pub fn offline() -> Self {
        Self {
            limits: RefCell::new(down()),
            billing: RefCell::new(down()),
            chat: RefCell::new(down()),
            billing_gates: RefCell::new(VecDeque::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every endpoint answers with sample data
    pub fn online() -> Self {
        let stub = Self::offline();
        *stub.limits.borrow_mut() = Ok(sample_limits());
        *stub.billing.borrow_mut() = Ok(sample_billing(2500.0, 5000.0));
        *stub.chat.borrow_mut() = Ok(ChatReply {
            reply: "Ola".to_string(),
            tokens_used: 42.0,
            transactions_context: None,
        });
        stub
    }

    /// Park the next ungated billing call until `gate` is notified
    pub fn with_billing_gate(self, gate: Rc<Notify>) -> Self {
        self.billing_gates.borrow_mut().push_back(gate);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

pub fn sample_limits() -> LimitsSummary {
    LimitsSummary {
        year: None,
        month: None,
        revenue_month: 10000.0,
        revenue_year: 50000.0,
        limit_remaining: 8000.0,
    }
}

pub fn sample_billing(tokens_used: f64, token_limit: f64) -> BillingSummary {
    BillingSummary {
        plan: PlanInfo {
            name: "Free".to_string(),
            token_limit,
            monthly_price: 0.0,
        },
        usage: UsageInfo {
            period_start: None,
            tokens_used,
            remaining_tokens: (token_limit - tokens_used).max(0.0),
            uploads: 2,
            api_calls: 3,
        },
    }
}

#[async_trait(?Send)]
impl BackendApi for StubApi {
    async fn limits_summary(&self, year: i32, user_id: u64) -> FetchResult<LimitsSummary> {
        self.calls.borrow_mut().push(Call::Limits { year, user_id });
        self.limits.borrow().clone()
    }

    async fn billing_summary(&self, user_id: u64) -> FetchResult<BillingSummary> {
        self.calls.borrow_mut().push(Call::Billing { user_id });
        // Snapshot before waiting so a test can swap the answer for the next call
        let answer = self.billing.borrow().clone();
        let gate = self.billing_gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        answer
    }

    async fn chat(&self, request: &ChatRequest) -> FetchResult<ChatReply> {
        self.calls.borrow_mut().push(Call::Chat(request.clone()));
        self.chat.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_stub_fails_every_endpoint() {
        let api = StubApi::offline();
        let refused = FetchError::Network("connection refused".to_string());

        assert_eq!(api.limits_summary(2026, 1).await, Err(refused.clone()));
        assert_eq!(api.billing_summary(1).await, Err(refused.clone()));
        let request = ChatRequest {
            user_id: 1,
            message: "oi".to_string(),
        };
        assert_eq!(api.chat(&request).await, Err(refused));
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_online_stub_answers_every_endpoint() {
        let api = StubApi::online();

        assert_eq!(api.limits_summary(2026, 1).await, Ok(sample_limits()));
        assert_eq!(api.billing_summary(1).await.map(|b| b.plan.name), Ok("Free".to_string()));
        let request = ChatRequest {
            user_id: 1,
            message: "oi".to_string(),
        };
        assert_eq!(api.chat(&request).await.map(|r| r.tokens_used), Ok(42.0));
    }
}
