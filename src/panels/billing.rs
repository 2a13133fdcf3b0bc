//! Billing Panel
//!
//! Plan, monthly price and token usage for the current period.

use crate::api::BackendApi;
use crate::view::{
    format_currency_cents, format_quantity, round_to, BillingView, Document, Node, Region,
};

/// Shown while the billing request is in flight
pub const LOADING_TEXT: &str = "Carregando plano e consumo...";

/// Shown when the billing request fails
pub const ERROR_TEXT: &str = "Não foi possível carregar os dados de faturamento.";

/// Inline style of the usage bar fill
pub fn usage_bar_style(view: &BillingView) -> String {
    format!("width: {}%", round_to(view.usage_percent(), 2))
}

pub fn loading_nodes() -> Vec<Node> {
    vec![Node::new("p").class("muted").text(LOADING_TEXT)]
}

pub fn error_nodes() -> Vec<Node> {
    vec![Node::new("p").class("error").text(ERROR_TEXT)]
}

/// Populated billing summary
pub fn billing_nodes(view: &BillingView) -> Vec<Node> {
    let plan = &view.plan;
    let usage = &view.usage;

    let summary = Node::new("div")
        .class("billing-summary")
        .child(
            Node::new("div")
                .class("billing-header")
                .child(Node::new("h4").text(format!("Plano {}", plan.name)))
                .child(
                    Node::new("p")
                        .class("muted")
                        .text(format!("{}/mês", format_currency_cents(plan.monthly_price))),
                ),
        )
        .child(
            Node::new("div")
                .class("usage-bar")
                .child(Node::new("div").class("usage-bar-fill").style(usage_bar_style(view))),
        )
        .child(Node::new("p").text(format!(
            "Consumo: {} de {} tokens",
            format_quantity(usage.tokens_used),
            format_quantity(plan.token_limit)
        )))
        .child(Node::new("p").text(format!(
            "Restante: {} tokens",
            format_quantity(usage.remaining_tokens)
        )))
        .child(Node::new("p").class("muted").text(format!(
            "Uploads: {} · Chamadas de API: {}",
            format_quantity(usage.uploads as f64),
            format_quantity(usage.api_calls as f64)
        )));

    vec![summary]
}

/// Replace the billing panel with the summary for `view`
pub fn render_billing(document: &dyn Document, view: &BillingView) {
    document.replace_children(Region::BillingPanel, billing_nodes(view));
}

/// Show the loading placeholder, fetch, then show the summary or the error text
pub async fn load_billing(api: &dyn BackendApi, document: &dyn Document, user_id: u64) {
    document.replace_children(Region::BillingPanel, loading_nodes());

    match api.billing_summary(user_id).await {
        Ok(summary) => render_billing(document, &BillingView::from(summary)),
        Err(error) => {
            tracing::error!(%error, user_id, "Failed to load billing summary");
            document.replace_children(Region::BillingPanel, error_nodes());
        }
    }
}
