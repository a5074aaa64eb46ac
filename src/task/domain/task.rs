//! Task aggregate root and the task status automaton.

use super::{
    ActualProgress, AssetId, ParsePriorityError, ParseTaskStatusError, PrerequisiteGraph,
    TaskDomainError, TaskId, TaskName, TaskSchedule, WorkDuration,
};
use crate::project::domain::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Nobody is assigned to the task.
    Unassigned,
    /// An asset is assigned and work may proceed.
    Assigned,
    /// The task has been completed.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unassigned => "unassigned",
            Self::Assigned => "assigned",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` for [`TaskStatus::Completed`].
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Computes the status that follows an assignment change.
    ///
    /// `Completed` is sticky: assignment edits on a completed task never
    /// change its status. Otherwise an assignee yields `Assigned` and no
    /// assignee yields `Unassigned`.
    #[must_use]
    pub const fn after_assignment(self, has_assignee: bool) -> Self {
        match (self, has_assignee) {
            (Self::Completed, _) => Self::Completed,
            (_, true) => Self::Assigned,
            (_, false) => Self::Unassigned,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "unassigned" => Ok(Self::Unassigned),
            "assigned" => Ok(Self::Assigned),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Priority level shared by tasks and projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default priority.
    Medium,
    /// Should be picked up soon.
    High,
    /// Blocks other work.
    Critical,
    /// Drop everything.
    Urgent,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning project.
    pub project_id: ProjectId,
    /// Task name.
    pub name: TaskName,
    /// Free-form description.
    pub details: Option<String>,
    /// Priority level.
    pub priority: Priority,
    /// Planned dates and estimate.
    pub schedule: TaskSchedule,
    /// Initial assignee, if any.
    pub assigned_to: Option<AssetId>,
}

impl NewTask {
    /// Creates creation parameters with an empty schedule and no assignee.
    #[must_use]
    pub const fn new(project_id: ProjectId, name: TaskName, priority: Priority) -> Self {
        Self {
            project_id,
            name,
            details: None,
            priority,
            schedule: TaskSchedule::new(),
            assigned_to: None,
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedTaskData")]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    name: TaskName,
    details: Option<String>,
    priority: Priority,
    status: TaskStatus,
    assigned_to: Option<AssetId>,
    prereq_task_id: Option<TaskId>,
    schedule: TaskSchedule,
    actuals: ActualProgress,
    delay_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted name.
    pub name: TaskName,
    /// Persisted description.
    pub details: Option<String>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted assignee.
    pub assigned_to: Option<AssetId>,
    /// Persisted prerequisite edge.
    pub prereq_task_id: Option<TaskId>,
    /// Persisted planned dates and estimate.
    pub schedule: TaskSchedule,
    /// Persisted actual dates and time spent.
    pub actuals: ActualProgress,
    /// Persisted delay explanation.
    pub delay_reason: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PersistedTaskData> for Task {
    type Error = TaskDomainError;

    fn try_from(value: PersistedTaskData) -> Result<Self, Self::Error> {
        Self::from_persisted(value)
    }
}

impl Task {
    /// Creates a new task.
    ///
    /// The task starts `Unassigned` and immediately runs the assignment
    /// transition, so a task created with an assignee is `Assigned`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateRange`] or
    /// [`TaskDomainError::InvalidDuration`] when the schedule is
    /// inconsistent.
    pub fn new(params: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let id = TaskId::new();
        params.schedule.validate(id)?;
        let timestamp = clock.utc();
        let status = TaskStatus::Unassigned.after_assignment(params.assigned_to.is_some());

        Ok(Self {
            id,
            project_id: params.project_id,
            name: params.name,
            details: params.details,
            priority: params.priority,
            status,
            assigned_to: params.assigned_to,
            prereq_task_id: None,
            schedule: params.schedule,
            actuals: ActualProgress::default(),
            delay_reason: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateRange`] or
    /// [`TaskDomainError::InvalidDuration`] when a completed task lacks
    /// complete actuals, or when the recorded actuals are inconsistent.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, TaskDomainError> {
        if data.status.is_completed() {
            data.actuals.validate_for_completion(data.id)?;
        } else {
            data.actuals.validate(data.id)?;
        }

        Ok(Self {
            id: data.id,
            project_id: data.project_id,
            name: data.name,
            details: data.details,
            priority: data.priority,
            status: data.status,
            assigned_to: data.assigned_to,
            prereq_task_id: data.prereq_task_id,
            schedule: data.schedule,
            actuals: data.actuals,
            delay_reason: data.delay_reason,
            created_at: data.created_at,
            updated_at: data.updated_at,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns the priority level.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<AssetId> {
        self.assigned_to
    }

    /// Returns the prerequisite task, if any.
    #[must_use]
    pub const fn prereq_task_id(&self) -> Option<TaskId> {
        self.prereq_task_id
    }

    /// Returns the planned dates and estimate.
    #[must_use]
    pub const fn schedule(&self) -> &TaskSchedule {
        &self.schedule
    }

    /// Returns the actual dates and time spent.
    #[must_use]
    pub const fn actuals(&self) -> &ActualProgress {
        &self.actuals
    }

    /// Returns the planned start date.
    #[must_use]
    pub const fn planned_start_date(&self) -> Option<NaiveDate> {
        self.schedule.planned_start_date
    }

    /// Returns the planned end date.
    #[must_use]
    pub const fn planned_end_date(&self) -> Option<NaiveDate> {
        self.schedule.planned_end_date
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.schedule.due_date
    }

    /// Returns the effort estimate.
    #[must_use]
    pub const fn estimated_time_to_complete(&self) -> Option<WorkDuration> {
        self.schedule.estimated_time_to_complete
    }

    /// Returns the actual start date.
    #[must_use]
    pub const fn actual_start_date(&self) -> Option<NaiveDate> {
        self.actuals.actual_start_date
    }

    /// Returns the actual end date.
    #[must_use]
    pub const fn actual_end_date(&self) -> Option<NaiveDate> {
        self.actuals.actual_end_date
    }

    /// Returns the time actually spent.
    #[must_use]
    pub const fn actual_time_to_complete(&self) -> Option<WorkDuration> {
        self.actuals.actual_time_to_complete
    }

    /// Returns the recorded reason for a delay, if any.
    #[must_use]
    pub fn delay_reason(&self) -> Option<&str> {
        self.delay_reason.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Start date to show: the actual start, else the planned start.
    #[must_use]
    pub const fn display_start_date(&self) -> Option<NaiveDate> {
        match self.actuals.actual_start_date {
            Some(date) => Some(date),
            None => self.schedule.planned_start_date,
        }
    }

    /// End date to show: the actual end, else the planned end.
    #[must_use]
    pub const fn display_end_date(&self) -> Option<NaiveDate> {
        match self.actuals.actual_end_date {
            Some(date) => Some(date),
            None => self.schedule.planned_end_date,
        }
    }

    /// Sets or clears the assignee and returns the resulting status.
    ///
    /// See [`TaskStatus::after_assignment`] for the transition rules.
    pub fn apply_assignment(
        &mut self,
        assignee: Option<AssetId>,
        clock: &impl Clock,
    ) -> TaskStatus {
        self.assigned_to = assignee;
        self.status = self.status.after_assignment(assignee.is_some());
        self.touch(clock);
        self.status
    }

    /// Sets or clears the prerequisite task.
    ///
    /// `graph` must be a snapshot of the prerequisite edges of this task's
    /// project. Clearing the prerequisite always succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CrossProjectPrerequisite`] when the
    /// candidate belongs to another project, or
    /// [`TaskDomainError::CircularDependency`] when the edge would close a
    /// cycle. The task is left untouched on error.
    pub fn set_prerequisite(
        &mut self,
        prerequisite: Option<&Self>,
        graph: &PrerequisiteGraph,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if let Some(candidate) = prerequisite {
            if candidate.project_id != self.project_id {
                return Err(TaskDomainError::CrossProjectPrerequisite {
                    task_id: self.id,
                    project_id: self.project_id,
                    prerequisite_id: candidate.id,
                    prerequisite_project: candidate.project_id,
                });
            }
        }
        let candidate_id = prerequisite.map(Self::id);
        graph.validate(self.id, candidate_id)?;

        self.prereq_task_id = candidate_id;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the planned dates and estimate.
    ///
    /// # Errors
    ///
    /// Returns the schedule validation error; the task is left untouched.
    pub fn reschedule(
        &mut self,
        schedule: TaskSchedule,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        schedule.validate(self.id)?;
        self.schedule = schedule;
        self.touch(clock);
        Ok(())
    }

    /// Records actual dates and time spent.
    ///
    /// A completed task only accepts actuals that would still satisfy
    /// completion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateRange`] or
    /// [`TaskDomainError::InvalidDuration`]; the task is left untouched.
    pub fn record_actuals(
        &mut self,
        actuals: ActualProgress,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if self.status.is_completed() {
            actuals.validate_for_completion(self.id)?;
        } else {
            actuals.validate(self.id)?;
        }
        self.actuals = actuals;
        self.touch(clock);
        Ok(())
    }

    /// Records why the task slipped.
    pub fn set_delay_reason(&mut self, reason: Option<String>, clock: &impl Clock) {
        self.delay_reason = reason.filter(|text| !text.trim().is_empty());
        self.touch(clock);
    }

    /// Marks an assigned task as completed.
    ///
    /// `prerequisite` must be the current state of the task named by
    /// [`Self::prereq_task_id`]. A prerequisite that cannot be supplied is
    /// treated as incomplete.
    ///
    /// # Errors
    ///
    /// Checked in order:
    /// - [`TaskDomainError::TaskAlreadyCompleted`] or
    ///   [`TaskDomainError::TaskNotAssigned`] when the task is not `Assigned`
    /// - [`TaskDomainError::PrerequisiteIncomplete`]
    /// - [`TaskDomainError::InvalidDateRange`] for missing or reversed
    ///   actual dates
    /// - [`TaskDomainError::InvalidDuration`] for a missing or non-positive
    ///   actual time
    ///
    /// The task is left untouched on error.
    pub fn complete(
        &mut self,
        prerequisite: Option<&Self>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        match self.status {
            TaskStatus::Completed => return Err(TaskDomainError::TaskAlreadyCompleted(self.id)),
            TaskStatus::Unassigned => return Err(TaskDomainError::TaskNotAssigned(self.id)),
            TaskStatus::Assigned => {}
        }

        if let Some(prerequisite_id) = self.prereq_task_id {
            let satisfied = prerequisite
                .is_some_and(|task| task.id == prerequisite_id && task.status.is_completed());
            if !satisfied {
                return Err(TaskDomainError::PrerequisiteIncomplete {
                    task_id: self.id,
                    prerequisite_id,
                });
            }
        }

        self.actuals.validate_for_completion(self.id)?;

        self.status = TaskStatus::Completed;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
