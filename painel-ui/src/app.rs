//! App Root Component
//!
//! Page shell with the regions and controls the dashboard core addresses
//! by id. Listeners are attached to whichever controls the core's handler
//! table binds, and each event runs as a local task.

use leptos::*;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use painel::{App as Dashboard, Config, Control, Region, Trigger};

use crate::api::GlooApi;
use crate::dom::DomDocument;

/// Root application component
#[component]
pub fn App(config: Config) -> impl IntoView {
    let Some(document) = DomDocument::new() else {
        return view! { <p class="error">"Documento indisponível."</p> }.into_view();
    };
    let backend = Rc::new(GlooApi::new(config.api.endpoints()));
    let dashboard = Dashboard::new(backend, Rc::new(document), config.user.id);

    // Runs after mount, so the control ids below are in the page
    create_effect(move |_| {
        let dashboard = dashboard.clone();
        spawn_local(async move {
            attach_listeners(&dashboard);
            dashboard.startup().await;
        });
    });

    view! {
        <main>
            <section>
                <div class="section-header">
                    <h2>"Resumo"</h2>
                    <button id=Control::RefreshDashboardButton.id()>"Atualizar"</button>
                </div>
                <div id=Region::CardGrid.id() class="card-grid" />
                <div id=Region::Alerts.id() class="alerts" />
            </section>

            <section>
                <div class="section-header">
                    <h2>"Plano e consumo"</h2>
                    <button id=Control::RefreshBillingButton.id()>"Atualizar"</button>
                </div>
                <div id=Region::BillingPanel.id() />
            </section>

            <section>
                <h2>"Assistente"</h2>
                <div id=Region::ChatLog.id() class="chat-messages" />
                <div class="chat-form">
                    <input
                        id=Control::ChatInput.id()
                        type="text"
                        placeholder="Pergunte sobre suas finanças..."
                    />
                    <button id=Control::ChatSendButton.id()>"Enviar"</button>
                </div>
            </section>
        </main>
    }
    .into_view()
}

/// Run the task bound to `trigger`, if any
fn fire(dashboard: &Dashboard, trigger: Trigger) {
    if let Some(task) = dashboard.task_for(&trigger) {
        tracing::debug!(task = %task.id, ?trigger, "Dispatching");
        spawn_local(async move {
            task.await;
        });
    }
}

/// One click and one keypress listener per control the handler table binds
///
/// Listeners live as long as the page, so their closures are leaked.
fn attach_listeners(dashboard: &Dashboard) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    for control in dashboard.handlers().controls() {
        let Some(element) = document.get_element_by_id(control.id()) else {
            tracing::warn!(id = control.id(), "Control not found");
            continue;
        };

        let app = dashboard.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || fire(&app, Trigger::Click(control)));
        let _ = element.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();

        let app = dashboard.clone();
        let on_key = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |event: web_sys::KeyboardEvent| fire(&app, Trigger::key(control, &event.key())),
        );
        let _ = element.add_event_listener_with_callback("keypress", on_key.as_ref().unchecked_ref());
        on_key.forget();
    }
}
