//! Error types for project domain validation and parsing.

use super::{ProjectDatePair, ProjectId, ScheduleField};
use crate::task::domain::TaskId;
use chrono::NaiveDate;
use thiserror::Error;

/// Business-rule violations raised by the project domain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The project name exceeds the storage limit.
    #[error("project name exceeds 50 character limit: {0}")]
    ProjectNameTooLong(String),

    /// The project is closed and accepts no further changes.
    #[error("project {0} is closed")]
    ProjectClosed(ProjectId),

    /// A manual status change tried to close the project.
    #[error("project {0} can only be closed through the closure gate")]
    ClosureRequiresGate(ProjectId),

    /// Closure attempted while tasks are still open.
    #[error(
        "project {project_id} cannot be closed: incomplete tasks exist ({} open)",
        .incomplete.len()
    )]
    IncompleteTasks {
        /// Project whose closure was refused.
        project_id: ProjectId,
        /// Tasks that are not yet completed.
        incomplete: Vec<TaskId>,
    },

    /// A baseline date was changed after being set.
    #[error("project {project_id}: {field} cannot be changed once set")]
    ScheduleLocked {
        /// Offending project.
        project_id: ProjectId,
        /// Baseline field that was changed.
        field: ScheduleField,
    },

    /// An end date precedes its start date.
    #[error("project {project_id} has an invalid {pair} date range ({start} to {end})")]
    InvalidDateRange {
        /// Offending project.
        project_id: ProjectId,
        /// Which pair of dates failed validation.
        pair: ProjectDatePair,
        /// Start of the range.
        start: NaiveDate,
        /// End of the range.
        end: NaiveDate,
    },

    /// RAG thresholds are not ordered `amber < green <= 100`.
    #[error("invalid health thresholds: green above {green}%, amber above {amber}%")]
    InvalidHealthThresholds {
        /// Green cut-off in percent.
        green: u8,
        /// Amber cut-off in percent.
        amber: u8,
    },
}

/// Error returned while parsing project statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);

/// Error returned while parsing RAG statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown RAG status: {0}")]
pub struct ParseRagStatusError(pub String);
