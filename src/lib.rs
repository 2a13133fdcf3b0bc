//! # Painel
//!
//! Small-business (MEI) dashboard core: monthly and yearly revenue with
//! estimated tax, a billing and usage panel, and an assistant chat, fed by
//! three HTTP/JSON services and falling back to static data when they are
//! unreachable.
//!
//! ## Modules
//!
//! - [`api`]: Backend port, DTOs and the reqwest client
//! - [`view`]: pt-BR formatting, view-models and the render port
//! - [`panels`]: Dashboard and billing loaders, chat controller
//! - [`wiring`]: Event-to-command table and the dispatching [`App`]
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use painel::{App, Config, HttpApi, MemoryDocument, Region};
//! use std::rc::Rc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = Config::load_default();
//!     let api = Rc::new(HttpApi::new(config.api.endpoints()));
//!     let document = Rc::new(MemoryDocument::new());
//!
//!     let app = App::new(api, document.clone(), config.user.id);
//!     app.startup().await;
//!
//!     print!("{}", document.render_text(Region::CardGrid));
//! }
//! ```

pub mod api;
pub mod config;
pub mod panels;
pub mod view;
pub mod wiring;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{
    BackendApi, BillingSummary, ChatReply, ChatRequest, Endpoints, FetchError, FetchResult,
    LimitsSummary,
};

#[cfg(feature = "native")]
pub use api::HttpApi;

pub use view::{
    Author, BillingView, ChatLog, ChatMessage, DashboardView, Document, Input, MemoryDocument,
    Node, Region,
};

pub use panels::{
    load_billing, load_dashboard, render_alerts, render_billing, render_cards, ChatController,
};

pub use wiring::{App, Command, Control, HandlerTable, Task, TaskId, TaskOutcome, Trigger};

pub use config::{generate_default_config, ApiConfig, Config, ConfigError, LoggingConfig, UserConfig};
