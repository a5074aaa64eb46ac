//! Project aggregate root, its status set and schedule rules.

use super::{
    ClosureDecision, ClosureGate, ParseProjectStatusError, ProjectDomainError, ProjectId,
    ProjectName,
};
use crate::task::domain::{AssetId, Priority, Task};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Freshly created.
    New,
    /// Work is done and the project waits to be closed.
    AwaitingClosure,
    /// Work is under way.
    InProgress,
    /// Work is suspended.
    OnHold,
    /// Requirements are being gathered.
    Scoping,
    /// A response has been sent to the requester.
    Responded,
    /// Closed for good.
    Closed,
}

impl ProjectStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::AwaitingClosure => "awaiting_closure",
            Self::InProgress => "in_progress",
            Self::OnHold => "on_hold",
            Self::Scoping => "scoping",
            Self::Responded => "responded",
            Self::Closed => "closed",
        }
    }

    /// Returns `true` for [`ProjectStatus::Closed`].
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ParseProjectStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "new" => Ok(Self::New),
            "awaiting_closure" => Ok(Self::AwaitingClosure),
            "in_progress" => Ok(Self::InProgress),
            "on_hold" => Ok(Self::OnHold),
            "scoping" => Ok(Self::Scoping),
            "responded" => Ok(Self::Responded),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseProjectStatusError(value.to_owned())),
        }
    }
}

/// Names the pair of project dates a range check was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectDatePair {
    /// Planned start and original target end.
    Target,
    /// Actual start and revised target end.
    Revised,
    /// Actual start and actual end.
    Actual,
}

impl ProjectDatePair {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::Revised => "revised",
            Self::Actual => "actual",
        }
    }
}

impl fmt::Display for ProjectDatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Baseline schedule fields that are frozen once set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleField {
    /// Planned start date.
    PlannedStartDate,
    /// Original target end date.
    OriginalTargetEndDate,
}

impl ScheduleField {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlannedStartDate => "planned start date",
            Self::OriginalTargetEndDate => "original target end date",
        }
    }
}

impl fmt::Display for ScheduleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All dates tracked for a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSchedule {
    /// Baseline start date.
    pub planned_start_date: Option<NaiveDate>,
    /// Baseline end date.
    pub original_target_end_date: Option<NaiveDate>,
    /// Re-planned end date.
    pub revised_target_end_date: Option<NaiveDate>,
    /// Date work actually started.
    pub actual_start_date: Option<NaiveDate>,
    /// Date work actually finished.
    pub actual_end_date: Option<NaiveDate>,
}

impl ProjectSchedule {
    /// Creates a baseline schedule.
    #[must_use]
    pub const fn planned(start: NaiveDate, target_end: NaiveDate) -> Self {
        Self {
            planned_start_date: Some(start),
            original_target_end_date: Some(target_end),
            revised_target_end_date: None,
            actual_start_date: None,
            actual_end_date: None,
        }
    }

    /// Start date to show: the actual start, else the planned start.
    #[must_use]
    pub const fn display_start_date(&self) -> Option<NaiveDate> {
        match self.actual_start_date {
            Some(date) => Some(date),
            None => self.planned_start_date,
        }
    }

    /// End date to show: the actual end, else the revised target, else the
    /// original target.
    #[must_use]
    pub const fn display_end_date(&self) -> Option<NaiveDate> {
        match (self.actual_end_date, self.revised_target_end_date) {
            (Some(date), _) | (None, Some(date)) => Some(date),
            (None, None) => self.original_target_end_date,
        }
    }

    fn validate(&self, project_id: ProjectId) -> Result<(), ProjectDomainError> {
        check_date_order(
            project_id,
            ProjectDatePair::Target,
            self.planned_start_date,
            self.original_target_end_date,
        )?;
        check_date_order(
            project_id,
            ProjectDatePair::Revised,
            self.actual_start_date,
            self.revised_target_end_date,
        )?;
        check_date_order(
            project_id,
            ProjectDatePair::Actual,
            self.actual_start_date,
            self.actual_end_date,
        )
    }
}

/// Parameter object for creating a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Unique project name.
    pub name: ProjectName,
    /// Free-form description.
    pub description: Option<String>,
    /// Planned start date.
    pub planned_start_date: Option<NaiveDate>,
    /// Original target end date.
    pub original_target_end_date: Option<NaiveDate>,
    /// Accountable asset.
    pub owner: Option<AssetId>,
    /// Priority level.
    pub priority: Option<Priority>,
}

impl NewProject {
    /// Creates creation parameters with only a name.
    #[must_use]
    pub const fn new(name: ProjectName) -> Self {
        Self {
            name,
            description: None,
            planned_start_date: None,
            original_target_end_date: None,
            owner: None,
            priority: None,
        }
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: Option<String>,
    status: ProjectStatus,
    schedule: ProjectSchedule,
    owner: Option<AssetId>,
    priority: Option<Priority>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: ProjectName,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted status.
    pub status: ProjectStatus,
    /// Persisted dates.
    pub schedule: ProjectSchedule,
    /// Persisted owner.
    pub owner: Option<AssetId>,
    /// Persisted priority.
    pub priority: Option<Priority>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project with status [`ProjectStatus::New`].
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidDateRange`] when the original
    /// target end precedes the planned start.
    pub fn new(params: NewProject, clock: &impl Clock) -> Result<Self, ProjectDomainError> {
        let id = ProjectId::new();
        let schedule = ProjectSchedule {
            planned_start_date: params.planned_start_date,
            original_target_end_date: params.original_target_end_date,
            ..ProjectSchedule::default()
        };
        schedule.validate(id)?;
        let timestamp = clock.utc();

        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            status: ProjectStatus::New,
            schedule,
            owner: params.owner,
            priority: params.priority,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            status: data.status,
            schedule: data.schedule,
            owner: data.owner,
            priority: data.priority,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns all tracked dates.
    #[must_use]
    pub const fn schedule(&self) -> &ProjectSchedule {
        &self.schedule
    }

    /// Returns the owner, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<AssetId> {
        self.owner
    }

    /// Returns the priority, if any.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
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

    /// See [`ProjectSchedule::display_start_date`].
    #[must_use]
    pub const fn display_start_date(&self) -> Option<NaiveDate> {
        self.schedule.display_start_date()
    }

    /// See [`ProjectSchedule::display_end_date`].
    #[must_use]
    pub const fn display_end_date(&self) -> Option<NaiveDate> {
        self.schedule.display_end_date()
    }

    /// Returns `false` once the display end date lies before `today`.
    #[must_use]
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.display_end_date().is_none_or(|end| end >= today)
    }

    /// Returns `true` once the project has been closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    /// Fails when the project no longer accepts changes.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ProjectClosed`] for a closed project.
    pub const fn ensure_open(&self) -> Result<(), ProjectDomainError> {
        if self.is_closed() {
            return Err(ProjectDomainError::ProjectClosed(self.id));
        }
        Ok(())
    }

    /// Changes the status of an open project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ProjectClosed`] when the project is
    /// already closed, or [`ProjectDomainError::ClosureRequiresGate`] when
    /// `status` is [`ProjectStatus::Closed`]; use [`Self::close`] instead.
    pub fn change_status(
        &mut self,
        status: ProjectStatus,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.ensure_open()?;
        if status.is_closed() {
            return Err(ProjectDomainError::ClosureRequiresGate(self.id));
        }
        self.status = status;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the project dates.
    ///
    /// The planned start and original target end may be filled in once and
    /// are frozen afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ProjectClosed`],
    /// [`ProjectDomainError::ScheduleLocked`] or
    /// [`ProjectDomainError::InvalidDateRange`]; the project is left
    /// untouched on error.
    pub fn update_schedule(
        &mut self,
        schedule: ProjectSchedule,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.ensure_open()?;
        check_locked(
            self.id,
            ScheduleField::PlannedStartDate,
            self.schedule.planned_start_date,
            schedule.planned_start_date,
        )?;
        check_locked(
            self.id,
            ScheduleField::OriginalTargetEndDate,
            self.schedule.original_target_end_date,
            schedule.original_target_end_date,
        )?;
        schedule.validate(self.id)?;
        self.schedule = schedule;
        self.touch(clock);
        Ok(())
    }

    /// Records actual start and end dates, keeping existing values for
    /// `None` arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ProjectClosed`] or
    /// [`ProjectDomainError::InvalidDateRange`]; the project is left
    /// untouched on error.
    pub fn record_actual_dates(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.ensure_open()?;
        let schedule = ProjectSchedule {
            actual_start_date: start.or(self.schedule.actual_start_date),
            actual_end_date: end.or(self.schedule.actual_end_date),
            ..self.schedule
        };
        schedule.validate(self.id)?;
        self.schedule = schedule;
        self.touch(clock);
        Ok(())
    }

    /// Closes the project when the closure gate allows it.
    ///
    /// Only the status changes; dates recorded alongside the closure are the
    /// caller's business.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ProjectClosed`] when the project is
    /// already closed, or [`ProjectDomainError::IncompleteTasks`] listing the
    /// open tasks. The project is left untouched on error.
    pub fn close(&mut self, tasks: &[Task], clock: &impl Clock) -> Result<(), ProjectDomainError> {
        self.ensure_open()?;
        if let ClosureDecision::Blocked { incomplete } = ClosureGate::evaluate(self, tasks) {
            return Err(ProjectDomainError::IncompleteTasks {
                project_id: self.id,
                incomplete,
            });
        }
        self.status = ProjectStatus::Closed;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn check_locked(
    project_id: ProjectId,
    field: ScheduleField,
    current: Option<NaiveDate>,
    proposed: Option<NaiveDate>,
) -> Result<(), ProjectDomainError> {
    match current {
        Some(date) if proposed != Some(date) => {
            Err(ProjectDomainError::ScheduleLocked { project_id, field })
        }
        _ => Ok(()),
    }
}

fn check_date_order(
    project_id: ProjectId,
    pair: ProjectDatePair,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ProjectDomainError> {
    match (start, end) {
        (Some(from), Some(to)) if to < from => Err(ProjectDomainError::InvalidDateRange {
            project_id,
            pair,
            start: from,
            end: to,
        }),
        _ => Ok(()),
    }
}
