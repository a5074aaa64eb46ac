//! Task dates and effort durations.

use super::{TaskDomainError, TaskId};
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names the pair of dates a range check was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePair {
    /// Planned start and planned end.
    Planned,
    /// Actual start and actual end.
    Actual,
    /// Planned start and due date.
    Due,
}

impl DatePair {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Actual => "actual",
            Self::Due => "due",
        }
    }
}

impl fmt::Display for DatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names the duration a positivity check was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationField {
    /// Estimated time to complete.
    Estimated,
    /// Actual time to complete.
    Actual,
}

impl DurationField {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Estimated => "estimated time to complete",
            Self::Actual => "actual time to complete",
        }
    }
}

impl fmt::Display for DurationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Amount of work spent on, or expected for, a task.
///
/// Stored with minute precision. Non-positive values can be represented so
/// that persisted data can be loaded and rejected by the completion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkDuration(i64);

impl WorkDuration {
    /// Creates a duration from whole minutes.
    #[must_use]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self(minutes)
    }

    /// Creates a duration from whole hours.
    #[must_use]
    pub const fn from_hours(hours: i64) -> Self {
        Self(hours.saturating_mul(60))
    }

    /// Creates a duration from a [`TimeDelta`], truncated to whole minutes.
    #[must_use]
    pub fn from_time_delta(delta: TimeDelta) -> Self {
        Self(delta.num_minutes())
    }

    /// Returns the duration in whole minutes.
    #[must_use]
    pub const fn minutes(self) -> i64 {
        self.0
    }

    /// Returns `true` when the duration is strictly greater than zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Converts to a [`TimeDelta`], or `None` when out of range.
    #[must_use]
    pub fn to_time_delta(self) -> Option<TimeDelta> {
        TimeDelta::try_minutes(self.0)
    }
}

/// Planned dates and effort estimate for a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSchedule {
    /// Planned start date.
    pub planned_start_date: Option<NaiveDate>,
    /// Planned end date.
    pub planned_end_date: Option<NaiveDate>,
    /// Date by which the task must be done.
    pub due_date: Option<NaiveDate>,
    /// Estimated time to complete.
    pub estimated_time_to_complete: Option<WorkDuration>,
}

impl TaskSchedule {
    /// Creates an empty schedule.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            planned_start_date: None,
            planned_end_date: None,
            due_date: None,
            estimated_time_to_complete: None,
        }
    }

    /// Sets the planned date range.
    #[must_use]
    pub const fn with_planned(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.planned_start_date = Some(start);
        self.planned_end_date = Some(end);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Sets the effort estimate.
    #[must_use]
    pub const fn with_estimate(mut self, estimate: WorkDuration) -> Self {
        self.estimated_time_to_complete = Some(estimate);
        self
    }

    /// Checks date ordering and estimate positivity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateRange`] when the planned end or
    /// due date precedes the planned start, or
    /// [`TaskDomainError::InvalidDuration`] for a non-positive estimate.
    pub fn validate(&self, task_id: TaskId) -> Result<(), TaskDomainError> {
        check_date_order(
            task_id,
            DatePair::Planned,
            self.planned_start_date,
            self.planned_end_date,
        )?;
        check_date_order(
            task_id,
            DatePair::Due,
            self.planned_start_date,
            self.due_date,
        )?;
        if self
            .estimated_time_to_complete
            .is_some_and(|estimate| !estimate.is_positive())
        {
            return Err(TaskDomainError::InvalidDuration {
                task_id,
                field: DurationField::Estimated,
            });
        }
        Ok(())
    }
}

/// Dates and effort recorded once work has happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualProgress {
    /// Date work actually started.
    pub actual_start_date: Option<NaiveDate>,
    /// Date work actually finished.
    pub actual_end_date: Option<NaiveDate>,
    /// Time actually spent.
    pub actual_time_to_complete: Option<WorkDuration>,
}

impl ActualProgress {
    /// Creates a fully populated record.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate, time_spent: WorkDuration) -> Self {
        Self {
            actual_start_date: Some(start),
            actual_end_date: Some(end),
            actual_time_to_complete: Some(time_spent),
        }
    }

    /// Checks that whatever has been recorded is consistent.
    ///
    /// Missing values are accepted here; completion applies the stricter
    /// rules in [`Self::validate_for_completion`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateRange`] when the actual end
    /// precedes the actual start, or [`TaskDomainError::InvalidDuration`]
    /// when a recorded time is not positive.
    pub fn validate(&self, task_id: TaskId) -> Result<(), TaskDomainError> {
        check_date_order(
            task_id,
            DatePair::Actual,
            self.actual_start_date,
            self.actual_end_date,
        )?;
        if self
            .actual_time_to_complete
            .is_some_and(|spent| !spent.is_positive())
        {
            return Err(TaskDomainError::InvalidDuration {
                task_id,
                field: DurationField::Actual,
            });
        }
        Ok(())
    }

    /// Checks that both actual dates and a positive time spent are present.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDateRange`] when either actual date
    /// is missing or out of order, and [`TaskDomainError::InvalidDuration`]
    /// when the time spent is missing or not positive.
    pub fn validate_for_completion(&self, task_id: TaskId) -> Result<(), TaskDomainError> {
        let (Some(start), Some(end)) = (self.actual_start_date, self.actual_end_date) else {
            return Err(TaskDomainError::InvalidDateRange {
                task_id,
                pair: DatePair::Actual,
                start: self.actual_start_date,
                end: self.actual_end_date,
            });
        };
        check_date_order(task_id, DatePair::Actual, Some(start), Some(end))?;

        match self.actual_time_to_complete {
            Some(spent) if spent.is_positive() => Ok(()),
            _ => Err(TaskDomainError::InvalidDuration {
                task_id,
                field: DurationField::Actual,
            }),
        }
    }
}

/// Rejects a range whose end precedes its start. Open ranges pass.
fn check_date_order(
    task_id: TaskId,
    pair: DatePair,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), TaskDomainError> {
    match (start, end) {
        (Some(from), Some(to)) if to < from => Err(TaskDomainError::InvalidDateRange {
            task_id,
            pair,
            start,
            end,
        }),
        _ => Ok(()),
    }
}
