//! Closure gate: decides whether a project may move to `Closed`.

use super::Project;
use crate::task::domain::{Task, TaskId};

/// Reason reported when open tasks block closure.
pub const INCOMPLETE_TASKS_REASON: &str = "incomplete tasks exist";

/// Outcome of a closure check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClosureDecision {
    /// Every task of the project is completed, or it has none.
    Closeable,
    /// Some tasks are still open.
    Blocked {
        /// Open tasks, in the order they were supplied.
        incomplete: Vec<TaskId>,
    },
}

impl ClosureDecision {
    /// Returns `true` when the project may close.
    #[must_use]
    pub const fn is_closeable(&self) -> bool {
        matches!(self, Self::Closeable)
    }

    /// Returns the refusal reason, or `None` when closure is allowed.
    #[must_use]
    pub const fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Closeable => None,
            Self::Blocked { .. } => Some(INCOMPLETE_TASKS_REASON),
        }
    }

    /// Returns the open tasks blocking closure.
    #[must_use]
    pub fn incomplete_tasks(&self) -> &[TaskId] {
        match self {
            Self::Closeable => &[],
            Self::Blocked { incomplete } => incomplete.as_slice(),
        }
    }
}

/// Stateless closure rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosureGate;

impl ClosureGate {
    /// Checks the project's tasks for anything not yet completed.
    ///
    /// `tasks` must be the full task list of the project taken from one
    /// consistent snapshot. Tasks owned by other projects are ignored.
    #[must_use]
    pub fn evaluate(project: &Project, tasks: &[Task]) -> ClosureDecision {
        let incomplete: Vec<TaskId> = tasks
            .iter()
            .filter(|task| task.project_id() == project.id())
            .filter(|task| !task.status().is_completed())
            .map(Task::id)
            .collect();

        if incomplete.is_empty() {
            ClosureDecision::Closeable
        } else {
            ClosureDecision::Blocked { incomplete }
        }
    }
}
