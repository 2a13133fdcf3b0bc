//! View Layer
//!
//! Formatting, view-models and the render port shared by every panel.

pub mod dom;
pub mod format;
pub mod model;

pub use dom::{Document, Input, MemoryDocument, Node, Region};
pub use format::{
    format_count, format_currency, format_currency_cents, format_number, format_quantity,
    round_to,
};
pub use model::{
    estimate_tax, Author, BillingView, ChatLog, ChatMessage, DashboardView, Plan, Usage, TAX_RATE,
};
