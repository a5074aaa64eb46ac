//! Error types for task domain validation and parsing.

use super::{DatePair, DurationField, TaskId};
use crate::project::domain::ProjectId;
use chrono::NaiveDate;
use thiserror::Error;

/// Business-rule violations raised by the task domain.
///
/// Every variant is an expected, recoverable rejection; callers present the
/// message and re-prompt with corrected input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The task name exceeds the storage limit.
    #[error("task name exceeds 50 character limit: {0}")]
    TaskNameTooLong(String),

    /// Adding the prerequisite edge would close a cycle.
    #[error(
        "making task {task_id} depend on task {prerequisite_id} would create a circular dependency"
    )]
    CircularDependency {
        /// Task being edited.
        task_id: TaskId,
        /// Candidate prerequisite task.
        prerequisite_id: TaskId,
    },

    /// The candidate prerequisite belongs to a different project.
    #[error(
        "task {prerequisite_id} belongs to project {prerequisite_project}, not to project {project_id} of task {task_id}"
    )]
    CrossProjectPrerequisite {
        /// Task being edited.
        task_id: TaskId,
        /// Project owning the edited task.
        project_id: ProjectId,
        /// Candidate prerequisite task.
        prerequisite_id: TaskId,
        /// Project owning the candidate prerequisite.
        prerequisite_project: ProjectId,
    },

    /// Completion attempted while the prerequisite task is not completed.
    #[error("task {task_id} cannot be completed before its prerequisite task {prerequisite_id}")]
    PrerequisiteIncomplete {
        /// Task being completed.
        task_id: TaskId,
        /// Prerequisite task that is still open.
        prerequisite_id: TaskId,
    },

    /// An end date precedes its start date, or a required date is missing.
    #[error("task {task_id} has an invalid {pair} date range ({start:?} to {end:?})")]
    InvalidDateRange {
        /// Offending task.
        task_id: TaskId,
        /// Which pair of dates failed validation.
        pair: DatePair,
        /// Start of the range, if set.
        start: Option<NaiveDate>,
        /// End of the range, if set.
        end: Option<NaiveDate>,
    },

    /// A required duration is missing or not positive.
    #[error("task {task_id} requires a positive {field}")]
    InvalidDuration {
        /// Offending task.
        task_id: TaskId,
        /// Which duration failed validation.
        field: DurationField,
    },

    /// Completion attempted on a task nobody is assigned to.
    #[error("task {0} must be assigned before it can be completed")]
    TaskNotAssigned(TaskId),

    /// Completion attempted on a task that is already completed.
    #[error("task {0} is already completed")]
    TaskAlreadyCompleted(TaskId),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
