//! View-Models
//!
//! Render-ready shapes of backend data. Every load builds a fresh value
//! which is dropped once rendered; only the chat log outlives a request.

use super::format::{format_currency_cents, round_to};
use crate::api::{BillingSummary, LimitsSummary};

/// Share of monthly revenue reserved as estimated tax
pub const TAX_RATE: f64 = 0.08;

/// The only alert shown when the limits summary cannot be loaded
pub const FIRST_INVOICE_ALERT: &str = "Envie sua primeira nota fiscal para liberar o dashboard.";

/// Reminder appended after the remaining-limit alert on live data
pub const UPLOAD_REMINDER_ALERT: &str = "Envie novas notas fiscais para atualizar o faturamento.";

/// Estimated tax for a month of revenue, rounded to cents
pub fn estimate_tax(revenue_month: f64) -> f64 {
    round_to(revenue_month * TAX_RATE, 2)
}

/// Alert text describing how much of the yearly MEI limit is left
pub fn limit_remaining_alert(limit_remaining: f64) -> String {
    format!("Limite restante MEI: {}", format_currency_cents(limit_remaining))
}

// ============================================
// Dashboard
// ============================================

/// Metrics shown in the card grid plus the alerts panel
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub revenue_month: f64,
    pub revenue_year: f64,
    pub tax_due: f64,
    pub documents_pending: u64,
    pub alerts: Vec<String>,
}

impl DashboardView {
    /// Static view used whenever the limits summary is unavailable
    pub fn fallback() -> Self {
        Self {
            revenue_month: 0.0,
            revenue_year: 0.0,
            tax_due: 0.0,
            documents_pending: 0,
            alerts: vec![FIRST_INVOICE_ALERT.to_string()],
        }
    }

    /// Build the view from a live limits summary
    ///
    /// `tax_due` is always derived from `revenue_month`. The summary carries
    /// nothing about pending documents, so that count stays at zero.
    pub fn from_summary(summary: &LimitsSummary) -> Self {
        Self {
            revenue_month: summary.revenue_month,
            revenue_year: summary.revenue_year,
            tax_due: estimate_tax(summary.revenue_month),
            documents_pending: 0,
            alerts: vec![
                limit_remaining_alert(summary.limit_remaining),
                UPLOAD_REMINDER_ALERT.to_string(),
            ],
        }
    }
}

// ============================================
// Billing
// ============================================

/// Subscription plan
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub name: String,
    pub token_limit: f64,
    pub monthly_price: f64,
}

/// Consumption within the current billing period
#[derive(Debug, Clone, PartialEq)]
pub struct Usage {
    pub tokens_used: f64,
    pub remaining_tokens: f64,
    pub uploads: u64,
    pub api_calls: u64,
}

/// Plan and usage shown in the billing panel
#[derive(Debug, Clone, PartialEq)]
pub struct BillingView {
    pub plan: Plan,
    pub usage: Usage,
}

impl BillingView {
    /// Fill percentage of the usage bar, clamped to `0..=100`
    pub fn usage_percent(&self) -> f64 {
        let used = self.usage.tokens_used;
        let limit = self.plan.token_limit;

        if limit <= 0.0 {
            return if used > 0.0 { 100.0 } else { 0.0 };
        }

        (used / limit * 100.0).clamp(0.0, 100.0)
    }
}

impl From<BillingSummary> for BillingView {
    fn from(summary: BillingSummary) -> Self {
        Self {
            plan: Plan {
                name: summary.plan.name,
                token_limit: summary.plan.token_limit,
                monthly_price: summary.plan.monthly_price,
            },
            usage: Usage {
                tokens_used: summary.usage.tokens_used,
                remaining_tokens: summary.usage.remaining_tokens,
                uploads: summary.usage.uploads,
                api_calls: summary.usage.api_calls,
            },
        }
    }
}

// ============================================
// Chat
// ============================================

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Author {
    User,
    Assistant,
}

impl Author {
    /// CSS modifier used for the bubble
    pub fn as_str(&self) -> &'static str {
        match self {
            Author::User => "user",
            Author::Assistant => "assistant",
        }
    }
}

/// One entry of the chat log
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
}

impl ChatMessage {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
        }
    }
}

/// Append-only, unbounded chat history for the lifetime of the page
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{PlanInfo, UsageInfo};

    fn billing(tokens_used: f64, token_limit: f64) -> BillingView {
        BillingView {
            plan: Plan {
                name: "Free".to_string(),
                token_limit,
                monthly_price: 0.0,
            },
            usage: Usage {
                tokens_used,
                remaining_tokens: (token_limit - tokens_used).max(0.0),
                uploads: 0,
                api_calls: 0,
            },
        }
    }

    #[test]
    fn test_estimate_tax() {
        assert_eq!(estimate_tax(10000.0), 800.0);
        assert_eq!(estimate_tax(0.0), 0.0);
        assert_eq!(estimate_tax(1234.56), 98.76);
    }

    #[test]
    fn test_from_summary() {
        let summary = LimitsSummary {
            year: Some(2026),
            month: Some(10),
            revenue_month: 10000.0,
            revenue_year: 50000.0,
            limit_remaining: 8000.0,
        };

        let view = DashboardView::from_summary(&summary);
        assert_eq!(view.revenue_month, 10000.0);
        assert_eq!(view.revenue_year, 50000.0);
        assert_eq!(view.tax_due, 800.0);
        assert_eq!(view.documents_pending, 0);
        assert_eq!(
            view.alerts,
            vec![
                "Limite restante MEI: R$ 8.000,00".to_string(),
                UPLOAD_REMINDER_ALERT.to_string(),
            ]
        );
    }

    #[test]
    fn test_fallback() {
        let view = DashboardView::fallback();
        assert_eq!(view.revenue_month, 0.0);
        assert_eq!(view.revenue_year, 0.0);
        assert_eq!(view.tax_due, 0.0);
        assert_eq!(view.documents_pending, 0);
        assert_eq!(view.alerts, vec![FIRST_INVOICE_ALERT.to_string()]);
    }

    #[test]
    fn test_usage_percent_clamped() {
        assert_eq!(billing(2500.0, 5000.0).usage_percent(), 50.0);
        assert_eq!(billing(5000.0, 5000.0).usage_percent(), 100.0);
        assert_eq!(billing(7500.0, 5000.0).usage_percent(), 100.0);
        assert_eq!(billing(0.0, 5000.0).usage_percent(), 0.0);
    }

    #[test]
    fn test_usage_percent_without_limit() {
        assert_eq!(billing(0.0, 0.0).usage_percent(), 0.0);
        assert_eq!(billing(10.0, 0.0).usage_percent(), 100.0);
    }

    #[test]
    fn test_billing_view_from_summary() {
        let summary = BillingSummary {
            plan: PlanInfo {
                name: "Pro".to_string(),
                token_limit: 50000.0,
                monthly_price: 79.9,
            },
            usage: UsageInfo {
                period_start: Some("2026-10-01".to_string()),
                tokens_used: 1200.0,
                remaining_tokens: 48800.0,
                uploads: 4,
                api_calls: 9,
            },
        };

        let view = BillingView::from(summary);
        assert_eq!(view.plan.name, "Pro");
        assert_eq!(view.usage.remaining_tokens, 48800.0);
        assert_eq!(view.usage.api_calls, 9);
    }

    #[test]
    fn test_chat_log_is_append_only() {
        let mut log = ChatLog::new();
        assert!(log.is_empty());

        log.push(ChatMessage::new(Author::User, "oi"));
        log.push(ChatMessage::new(Author::Assistant, "Ola"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.last().map(|m| m.author), Some(Author::Assistant));
        let authors: Vec<_> = log.iter().map(|m| m.author.as_str()).collect();
        assert_eq!(authors, vec!["user", "assistant"]);
    }
}
