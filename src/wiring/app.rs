//! Dashboard Application
//!
//! Holds the injected backend, document and user id, and turns commands
//! into panel calls.

use futures_util::future::{join, Abortable};
use std::rc::Rc;

use super::tasks::FinishGuard;
use super::{Command, HandlerTable, Task, TaskId, TaskOutcome, TaskRegistry, Trigger};
use crate::api::BackendApi;
use crate::panels::{load_billing, load_dashboard, ChatController};
use crate::view::Document;

/// The wired dashboard
///
/// Cheap to clone: every clone shares the same backend, document, chat log
/// and task registry, so event listeners can each own one.
#[derive(Clone)]
pub struct App {
    api: Rc<dyn BackendApi>,
    document: Rc<dyn Document>,
    user_id: u64,
    chat: Rc<ChatController>,
    handlers: Rc<HandlerTable>,
    tasks: Rc<TaskRegistry>,
}

impl App {
    /// Wire the dashboard with the default bindings
    pub fn new(api: Rc<dyn BackendApi>, document: Rc<dyn Document>, user_id: u64) -> Self {
        Self {
            api,
            document,
            user_id,
            chat: Rc::new(ChatController::new()),
            handlers: Rc::new(HandlerTable::default_bindings()),
            tasks: Rc::new(TaskRegistry::new()),
        }
    }

    /// Replace the handler table
    pub fn with_handlers(mut self, handlers: HandlerTable) -> Self {
        self.handlers = Rc::new(handlers);
        self
    }

    pub fn chat(&self) -> &ChatController {
        &self.chat
    }

    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    /// Run one command to completion
    pub async fn dispatch(&self, command: Command) {
        let api = self.api.as_ref();
        let document = self.document.as_ref();

        match command {
            Command::RefreshDashboard => load_dashboard(api, document, self.user_id).await,
            Command::RefreshBilling => load_billing(api, document, self.user_id).await,
            Command::SendChat => self.chat.send_message(api, document, self.user_id).await,
        }
    }

    /// Run the command bound to `trigger`; returns false if nothing is bound
    pub async fn handle(&self, trigger: &Trigger) -> bool {
        match self.handlers.resolve(trigger) {
            Some(command) => {
                self.dispatch(command).await;
                true
            }
            None => false,
        }
    }

    /// Abortable, registered version of [`App::dispatch`]
    ///
    /// The returned task owns a clone of the app, so it can be handed to a
    /// local executor. Dropping it unpolled unregisters it.
    pub fn task(&self, command: Command) -> Task {
        let (id, registration) = self.tasks.register(command);
        let guard = FinishGuard {
            registry: Rc::clone(&self.tasks),
            id,
        };
        let app = self.clone();

        let future = async move {
            let _guard = guard;
            match Abortable::new(app.dispatch(command), registration).await {
                Ok(()) => TaskOutcome::Completed,
                Err(_) => TaskOutcome::Cancelled,
            }
        };

        Task {
            id,
            command,
            future: Box::pin(future),
        }
    }

    /// Task for the command bound to `trigger`
    pub fn task_for(&self, trigger: &Trigger) -> Option<Task> {
        self.handlers
            .resolve(trigger)
            .map(|command| self.task(command))
    }

    /// Load the dashboard and billing panels concurrently
    pub async fn startup(&self) {
        tracing::info!(user_id = self.user_id, "Loading dashboard and billing");
        join(
            self.task(Command::RefreshDashboard),
            self.task(Command::RefreshBilling),
        )
        .await;
    }

    /// Tasks started and not yet finished, oldest first
    pub fn in_flight(&self) -> Vec<(TaskId, Command)> {
        self.tasks.running()
    }

    pub fn cancel(&self, id: TaskId) -> bool {
        self.tasks.cancel(id)
    }

    pub fn cancel_all(&self) -> usize {
        self.tasks.cancel_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;
    use crate::panels::billing::{ERROR_TEXT, LOADING_TEXT};
    use crate::panels::dashboard::ALERTS_TITLE;
    use crate::testing::{sample_billing, Call, StubApi};
    use crate::view::{Input, MemoryDocument, Region};
    use crate::wiring::Control;
    use tokio::sync::Notify;

    fn app_with(api: StubApi) -> (App, Rc<StubApi>, Rc<MemoryDocument>) {
        let api = Rc::new(api);
        let doc = Rc::new(MemoryDocument::new());
        let app = App::new(api.clone(), doc.clone(), 1);
        (app, api, doc)
    }

    #[tokio::test]
    async fn test_startup_loads_both_panels() {
        let (app, api, doc) = app_with(StubApi::online());

        app.startup().await;

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.contains(&Call::Billing { user_id: 1 }));
        assert_eq!(doc.children(Region::CardGrid).len(), 4);
        assert_eq!(doc.texts(Region::Alerts).len(), 3);
        assert!(doc.texts(Region::BillingPanel)[0].starts_with("Plano Free"));
        assert!(app.tasks().running().is_empty());
    }

    #[tokio::test]
    async fn test_startup_offline_falls_back_everywhere() {
        let (app, _api, doc) = app_with(StubApi::offline());

        app.startup().await;

        assert_eq!(doc.texts(Region::Alerts).len(), 2);
        assert_eq!(doc.texts(Region::Alerts)[0], ALERTS_TITLE);
        assert_eq!(doc.texts(Region::BillingPanel), vec![ERROR_TEXT]);
        assert!(doc.children(Region::ChatLog).is_empty());
    }

    #[tokio::test]
    async fn test_handle_routes_triggers() {
        let (app, api, doc) = app_with(StubApi::online());

        assert!(app.handle(&Trigger::Click(Control::RefreshBillingButton)).await);
        assert_eq!(api.calls(), vec![Call::Billing { user_id: 1 }]);

        doc.set_input(Input::ChatMessage, "oi");
        assert!(app.handle(&Trigger::key(Control::ChatInput, "Enter")).await);
        assert_eq!(app.chat().len(), 2);

        assert!(!app.handle(&Trigger::key(Control::ChatInput, "Escape")).await);
        assert_eq!(api.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_custom_handler_table() {
        let mut table = HandlerTable::new();
        table.register(Trigger::Click(Control::ChatSendButton), Command::RefreshDashboard);
        let (app, api, _doc) = app_with(StubApi::online());
        let app = app.with_handlers(table);

        assert!(app.handle(&Trigger::Click(Control::ChatSendButton)).await);
        assert!(matches!(api.calls()[0], Call::Limits { user_id: 1, .. }));
        assert!(app.task_for(&Trigger::Click(Control::RefreshBillingButton)).is_none());
        assert_eq!(app.handlers().controls(), vec![Control::ChatSendButton]);
    }

    #[tokio::test]
    async fn test_cancelled_task_leaves_loading_state() {
        let gate = Rc::new(Notify::new());
        let (app, _api, doc) = app_with(StubApi::online().with_billing_gate(gate));

        let task = app.task(Command::RefreshBilling);
        let id = task.id;
        assert_eq!(app.in_flight(), vec![(id, Command::RefreshBilling)]);

        let cancel = async {
            tokio::task::yield_now().await;
            assert!(app.cancel(id));
        };
        let (outcome, ()) = tokio::join!(task, cancel);

        assert_eq!(outcome, TaskOutcome::Cancelled);
        assert_eq!(doc.texts(Region::BillingPanel), vec![LOADING_TEXT]);
        assert!(app.tasks().running().is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_refreshes_last_writer_wins() {
        let first_gate = Rc::new(Notify::new());
        let second_gate = Rc::new(Notify::new());
        let stub = StubApi::online()
            .with_billing_gate(Rc::clone(&first_gate))
            .with_billing_gate(Rc::clone(&second_gate));
        let (app, api, doc) = app_with(stub);

        let first = app.task(Command::RefreshBilling);
        let scenario = async {
            tokio::task::yield_now().await;
            // The first request is parked holding the successful answer
            *api.billing.borrow_mut() = Err(FetchError::Status { status: 500 });
            let second = app.task(Command::RefreshBilling);
            assert_eq!(app.tasks().count(Command::RefreshBilling), 2);

            second_gate.notify_one();
            assert_eq!(second.await, TaskOutcome::Completed);
            assert_eq!(doc.texts(Region::BillingPanel), vec![ERROR_TEXT]);

            first_gate.notify_one();
        };

        let (outcome, ()) = tokio::join!(first, scenario);

        assert_eq!(outcome, TaskOutcome::Completed);
        assert_eq!(api.calls().len(), 2);
        assert!(doc.texts(Region::BillingPanel)[0].starts_with("Plano Free"));
        assert!(app.tasks().running().is_empty());
    }

    #[tokio::test]
    async fn test_dropped_task_unregisters() {
        let (app, api, _doc) = app_with(StubApi::online());

        let task = app.task(Command::RefreshDashboard);
        drop(task);

        assert!(app.tasks().running().is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failing_chat_does_not_affect_other_panels() {
        let api = StubApi::online();
        *api.chat.borrow_mut() = Err(FetchError::Network("reset".to_string()));
        *api.billing.borrow_mut() = Ok(sample_billing(7500.0, 5000.0));
        let (app, _api, doc) = app_with(api);

        app.startup().await;
        doc.set_input(Input::ChatMessage, "oi");
        app.dispatch(Command::SendChat).await;

        assert_eq!(app.chat().len(), 2);
        assert_eq!(doc.children(Region::CardGrid).len(), 4);
        assert!(doc.texts(Region::BillingPanel)[0].contains("Consumo: 7.500 de 5.000 tokens"));
    }
}
