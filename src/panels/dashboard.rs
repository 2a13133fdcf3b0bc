//! Dashboard Panel
//!
//! Card grid and alerts panel fed by the limits summary.

use chrono::Datelike;

use crate::api::BackendApi;
use crate::view::{format_count, format_currency, DashboardView, Document, Node, Region};

/// Header of the alerts panel
pub const ALERTS_TITLE: &str = "Alertas";

/// Calendar year the limits summary is requested for
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// The four metric cards, in display order
pub fn card_nodes(view: &DashboardView) -> Vec<Node> {
    let cards = [
        ("Faturamento (mês)", format_currency(view.revenue_month)),
        ("Faturamento (ano)", format_currency(view.revenue_year)),
        ("Impostos estimados", format_currency(view.tax_due)),
        ("Documentos pendentes", format_count(view.documents_pending)),
    ];

    cards
        .into_iter()
        .map(|(title, value)| {
            Node::new("div")
                .class("card")
                .child(Node::new("p").class("muted").text(title))
                .child(Node::new("div").class("metric").text(value))
        })
        .collect()
}

/// Alerts header followed by one block per alert, input order preserved
pub fn alert_nodes(alerts: &[String]) -> Vec<Node> {
    std::iter::once(Node::new("h4").text(ALERTS_TITLE))
        .chain(
            alerts
                .iter()
                .map(|text| Node::new("div").class("alert-item").text(text.as_str())),
        )
        .collect()
}

/// Replace the card grid with the cards for `view`
pub fn render_cards(document: &dyn Document, view: &DashboardView) {
    document.replace_children(Region::CardGrid, card_nodes(view));
}

/// Replace the alerts panel with `alerts`
pub fn render_alerts(document: &dyn Document, alerts: &[String]) {
    document.replace_children(Region::Alerts, alert_nodes(alerts));
}

/// Fetch the limits summary and turn it into a view, falling back on any failure
pub async fn fetch_dashboard(api: &dyn BackendApi, year: i32, user_id: u64) -> DashboardView {
    match api.limits_summary(year, user_id).await {
        Ok(summary) => DashboardView::from_summary(&summary),
        Err(error) => {
            tracing::warn!(%error, year, user_id, "Limits summary unavailable, using local dashboard data");
            DashboardView::fallback()
        }
    }
}

/// Repaint the card grid and alerts for the current year
pub async fn load_dashboard(api: &dyn BackendApi, document: &dyn Document, user_id: u64) {
    load_dashboard_for_year(api, document, current_year(), user_id).await;
}

/// Repaint the card grid and alerts for `year`
pub async fn load_dashboard_for_year(
    api: &dyn BackendApi,
    document: &dyn Document,
    year: i32,
    user_id: u64,
) {
    let view = fetch_dashboard(api, year, user_id).await;
    render_cards(document, &view);
    render_alerts(document, &view.alerts);
}
