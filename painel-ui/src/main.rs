//! Painel MEI Dashboard
//!
//! Browser host for the painel core, built with Leptos (WASM).
//!
//! # Features
//!
//! - Revenue cards and MEI alerts from the limits service
//! - Plan and token usage from the billing service
//! - Assistant chat
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Leptos draws the static page shell; the panels themselves
//! are written by the core through [`dom::DomDocument`], and requests go
//! through the gloo-net [`api::GlooApi`].

use leptos::*;

mod api;
mod app;
mod dom;
mod logging;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let config = api::load_config();
    logging::init(&config.logging.level);

    mount_to_body(move || view! { <app::App config=config /> });
}
