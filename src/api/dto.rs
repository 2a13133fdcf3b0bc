//! Data Transfer Objects
//!
//! Request and response bodies of the limits, billing and assistant
//! services. Only the fields the dashboard consumes are required; the rest
//! are optional so newer service versions keep parsing.

use serde::{Deserialize, Serialize};

// ============================================
// LIMITS DTOs
// ============================================

/// `GET /limits/summary` response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LimitsSummary {
    /// Reference year echoed by the service
    #[serde(default)]
    pub year: Option<i32>,
    /// Reference month echoed by the service
    #[serde(default)]
    pub month: Option<u32>,
    /// Revenue for the current month
    pub revenue_month: f64,
    /// Revenue for the reference year
    pub revenue_year: f64,
    /// What is left of the yearly MEI revenue limit
    pub limit_remaining: f64,
}

// ============================================
// BILLING DTOs
// ============================================

/// `GET /billing/me` response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BillingSummary {
    pub plan: PlanInfo,
    pub usage: UsageInfo,
}

/// Plan section of the billing response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlanInfo {
    pub name: String,
    pub token_limit: f64,
    pub monthly_price: f64,
}

/// Usage section of the billing response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UsageInfo {
    /// First day of the billing period (ISO date)
    #[serde(default)]
    pub period_start: Option<String>,
    pub tokens_used: f64,
    pub remaining_tokens: f64,
    pub uploads: u64,
    pub api_calls: u64,
}

// ============================================
// ASSISTANT DTOs
// ============================================

/// `POST /assistant/chat` request
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatRequest {
    pub user_id: u64,
    pub message: String,
}

/// `POST /assistant/chat` response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub tokens_used: f64,
    /// Transaction summary the assistant based its answer on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions_context: Option<serde_json::Value>,
}
