//! Panels
//!
//! Loaders, renderers and the chat controller. Each one writes to its own
//! region of the document, so their completions may interleave freely.
//! Errors never leave a panel: every failure becomes a fallback view, an
//! error message or an error bubble, plus a log entry.

pub mod billing;
pub mod chat;
pub mod dashboard;

pub use billing::{billing_nodes, load_billing, render_billing};
pub use chat::{bubble_node, ChatController};
pub use dashboard::{
    alert_nodes, card_nodes, current_year, fetch_dashboard, load_dashboard,
    load_dashboard_for_year, render_alerts, render_cards,
};
