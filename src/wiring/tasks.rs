//! In-Flight Tasks
//!
//! Every dispatched command can run as an abortable [`Task`] registered
//! under a [`TaskId`]. Nothing is cancelled or deduplicated automatically:
//! two refreshes of the same panel both run and the last one to settle
//! wins. The registry only makes that state visible and cancellable.

use futures_util::future::{AbortHandle, AbortRegistration, LocalBoxFuture};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use super::Command;

/// Identifier of a dispatched command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// How a task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed,
    Cancelled,
}

struct Running {
    id: TaskId,
    command: Command,
    handle: AbortHandle,
}

/// Commands currently in flight
#[derive(Default)]
pub struct TaskRegistry {
    next_id: Cell<u64>,
    running: RefCell<Vec<Running>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new task and hand back the registration its future is aborted through
    pub fn register(&self, command: Command) -> (TaskId, AbortRegistration) {
        let id = TaskId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        let (handle, registration) = AbortHandle::new_pair();
        self.running.borrow_mut().push(Running {
            id,
            command,
            handle,
        });

        tracing::debug!(task = %id, ?command, "Task started");
        (id, registration)
    }

    /// Forget a task once it has settled or been dropped
    pub fn finish(&self, id: TaskId) {
        self.running.borrow_mut().retain(|task| task.id != id);
    }

    /// Abort one task; returns false if it was not running
    pub fn cancel(&self, id: TaskId) -> bool {
        let running = self.running.borrow();
        match running.iter().find(|task| task.id == id) {
            Some(task) => {
                tracing::debug!(task = %id, command = ?task.command, "Task cancelled");
                task.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Abort every running task; returns how many were signalled
    pub fn cancel_all(&self) -> usize {
        let running = self.running.borrow();
        for task in running.iter() {
            task.handle.abort();
        }
        running.len()
    }

    /// Running tasks, oldest first
    pub fn running(&self) -> Vec<(TaskId, Command)> {
        self.running
            .borrow()
            .iter()
            .map(|task| (task.id, task.command))
            .collect()
    }

    /// How many tasks are running `command`
    pub fn count(&self, command: Command) -> usize {
        self.running
            .borrow()
            .iter()
            .filter(|task| task.command == command)
            .count()
    }
}

/// Removes the task from its registry when the task future goes away
pub(crate) struct FinishGuard {
    pub(crate) registry: Rc<TaskRegistry>,
    pub(crate) id: TaskId,
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        self.registry.finish(self.id);
    }
}

/// A dispatched command, ready to be awaited or spawned on a local executor
pub struct Task {
    pub id: TaskId,
    pub command: Command,
    pub(crate) future: LocalBoxFuture<'static, TaskOutcome>,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

impl Future for Task {
    type Output = TaskOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.as_mut().poll(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_finish() {
        let registry = TaskRegistry::new();
        let (first, _) = registry.register(Command::RefreshDashboard);
        let (second, _) = registry.register(Command::RefreshDashboard);

        assert_ne!(first, second);
        assert_eq!(registry.count(Command::RefreshDashboard), 2);
        assert_eq!(registry.count(Command::SendChat), 0);

        registry.finish(first);
        assert_eq!(
            registry.running(),
            vec![(second, Command::RefreshDashboard)]
        );
    }

    #[test]
    fn test_cancel_unknown_task() {
        let registry = TaskRegistry::new();
        let (id, _) = registry.register(Command::RefreshBilling);
        registry.finish(id);

        assert!(!registry.cancel(id));
        assert_eq!(registry.cancel_all(), 0);
    }

    #[test]
    fn test_guard_finishes_on_drop() {
        let registry = Rc::new(TaskRegistry::new());
        let (id, _) = registry.register(Command::SendChat);

        drop(FinishGuard {
            registry: Rc::clone(&registry),
            id,
        });
        assert!(registry.running().is_empty());
    }

    #[test]
    fn test_task_id_display() {
        let registry = TaskRegistry::new();
        let (id, _) = registry.register(Command::SendChat);
        assert_eq!(id.to_string(), "task-0");
    }
}
