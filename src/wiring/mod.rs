//! Event Wiring
//!
//! Maps host events (button clicks, key presses) to dashboard commands.
//! The host registers one listener per [`Control`] and forwards each event
//! as a [`Trigger`]; the [`HandlerTable`] decides which [`Command`] runs.

mod app;
mod tasks;

pub use app::App;
pub use tasks::{Task, TaskId, TaskOutcome, TaskRegistry};

/// Something the dashboard can do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Re-run the dashboard loader
    RefreshDashboard,
    /// Re-run the billing loader
    RefreshBilling,
    /// Send the chat box content to the assistant
    SendChat,
}

/// Interactive elements of the host page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    RefreshDashboardButton,
    RefreshBillingButton,
    ChatSendButton,
    ChatInput,
}

impl Control {
    /// Element id in the host page
    pub fn id(&self) -> &'static str {
        match self {
            Control::RefreshDashboardButton => "refresh-dashboard",
            Control::RefreshBillingButton => "refresh-billing",
            Control::ChatSendButton => "chat-send",
            Control::ChatInput => "chat-input",
        }
    }
}

/// A host event on a control
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trigger {
    Click(Control),
    /// Key press with the DOM `KeyboardEvent.key` value
    KeyPress(Control, String),
}

impl Trigger {
    pub fn key(control: Control, key: &str) -> Self {
        Trigger::KeyPress(control, key.to_string())
    }

    pub fn control(&self) -> Control {
        match self {
            Trigger::Click(control) | Trigger::KeyPress(control, _) => *control,
        }
    }
}

/// Ordered trigger to command bindings; the first match wins
#[derive(Debug, Clone, Default)]
pub struct HandlerTable {
    bindings: Vec<(Trigger, Command)>,
}

impl HandlerTable {
    /// Table with no bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh buttons, the send button and Enter in the chat box
    pub fn default_bindings() -> Self {
        let mut table = Self::new();
        table.register(
            Trigger::Click(Control::RefreshDashboardButton),
            Command::RefreshDashboard,
        );
        table.register(
            Trigger::Click(Control::RefreshBillingButton),
            Command::RefreshBilling,
        );
        table.register(Trigger::Click(Control::ChatSendButton), Command::SendChat);
        table.register(Trigger::key(Control::ChatInput, "Enter"), Command::SendChat);
        table
    }

    pub fn register(&mut self, trigger: Trigger, command: Command) {
        self.bindings.push((trigger, command));
    }

    /// Command bound to `trigger`, if any
    pub fn resolve(&self, trigger: &Trigger) -> Option<Command> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == trigger)
            .map(|(_, command)| *command)
    }

    /// Controls that need a listener
    pub fn controls(&self) -> Vec<Control> {
        let mut controls = Vec::new();
        for (trigger, _) in &self.bindings {
            let control = trigger.control();
            if !controls.contains(&control) {
                controls.push(control);
            }
        }
        controls
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
