//! RAG (Red/Amber/Green) project health.
//!
//! Health compares the share of the schedule still remaining with fixed
//! cut-offs. Ratios are compared by integer cross-multiplication, so the
//! cut-offs themselves are exact: a remaining share of exactly 75% is not
//! green and exactly 25% is red.

use super::{ParseRagStatusError, Project, ProjectDomainError};
use crate::task::domain::Task;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Traffic-light health indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RagStatus {
    /// On track.
    Green,
    /// Needs attention.
    Amber,
    /// In trouble.
    Red,
}

impl RagStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Red => "red",
        }
    }

    /// Returns the single-letter display code.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Green => 'G',
            Self::Amber => 'A',
            Self::Red => 'R',
        }
    }
}

impl fmt::Display for RagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RagStatus {
    type Error = ParseRagStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "green" | "g" => Ok(Self::Green),
            "amber" | "a" => Ok(Self::Amber),
            "red" | "r" => Ok(Self::Red),
            _ => Err(ParseRagStatusError(value.to_owned())),
        }
    }
}

/// Task counts feeding the health calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskProgress {
    /// Number of tasks in the project.
    pub total: usize,
    /// Number of those tasks that are completed.
    pub completed: usize,
}

impl TaskProgress {
    /// Creates progress counts.
    #[must_use]
    pub const fn new(total: usize, completed: usize) -> Self {
        Self { total, completed }
    }

    /// Counts the supplied tasks.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks
            .iter()
            .filter(|task| task.status().is_completed())
            .count();
        Self::new(tasks.len(), completed)
    }

    /// Returns `true` once every task is completed. Zero tasks is not done.
    #[must_use]
    pub const fn is_done(self) -> bool {
        self.total > 0 && self.completed >= self.total
    }
}

/// Cut-offs for the remaining-schedule share, in whole percent.
///
/// # Examples
///
/// ```
/// use keystone::project::domain::HealthThresholds;
///
/// let defaults = HealthThresholds::default();
/// assert_eq!(defaults.green_above_percent(), 75);
/// assert_eq!(defaults.amber_above_percent(), 25);
///
/// assert!(HealthThresholds::new(20, 40).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHealthThresholds", into = "RawHealthThresholds")]
pub struct HealthThresholds {
    green_above_percent: u8,
    amber_above_percent: u8,
}

impl HealthThresholds {
    /// Default green cut-off.
    pub const DEFAULT_GREEN_ABOVE_PERCENT: u8 = 75;
    /// Default amber cut-off.
    pub const DEFAULT_AMBER_ABOVE_PERCENT: u8 = 25;

    /// Creates validated thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidHealthThresholds`] unless
    /// `amber < green <= 100`.
    pub const fn new(
        green_above_percent: u8,
        amber_above_percent: u8,
    ) -> Result<Self, ProjectDomainError> {
        if amber_above_percent >= green_above_percent || green_above_percent > 100 {
            return Err(ProjectDomainError::InvalidHealthThresholds {
                green: green_above_percent,
                amber: amber_above_percent,
            });
        }
        Ok(Self {
            green_above_percent,
            amber_above_percent,
        })
    }

    /// Remaining share (percent) that must be exceeded for green.
    #[must_use]
    pub const fn green_above_percent(self) -> u8 {
        self.green_above_percent
    }

    /// Remaining share (percent) that must be exceeded for amber.
    #[must_use]
    pub const fn amber_above_percent(self) -> u8 {
        self.amber_above_percent
    }

    /// Computes the RAG status of a project.
    ///
    /// Rules, first match wins:
    /// 1. closed projects are green
    /// 2. projects without tasks are amber
    /// 3. projects whose tasks are all completed are green
    /// 4. projects missing a display start or end date are amber
    /// 5. a non-positive planned span is red
    /// 6. otherwise the share of the span remaining after `today` decides
    #[must_use]
    pub fn rag_for(self, project: &Project, progress: TaskProgress, today: NaiveDate) -> RagStatus {
        if project.is_closed() {
            return RagStatus::Green;
        }
        if progress.total == 0 {
            return RagStatus::Amber;
        }
        if progress.is_done() {
            return RagStatus::Green;
        }
        let (Some(start), Some(end)) = (project.display_start_date(), project.display_end_date())
        else {
            return RagStatus::Amber;
        };

        let total_days = end.signed_duration_since(start).num_days();
        let remaining_days = end.signed_duration_since(today).num_days().max(0);
        if total_days <= 0 {
            return RagStatus::Red;
        }

        let remaining_scaled = remaining_days.saturating_mul(100);
        if remaining_scaled > total_days.saturating_mul(i64::from(self.green_above_percent)) {
            RagStatus::Green
        } else if remaining_scaled > total_days.saturating_mul(i64::from(self.amber_above_percent))
        {
            RagStatus::Amber
        } else {
            RagStatus::Red
        }
    }
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            green_above_percent: Self::DEFAULT_GREEN_ABOVE_PERCENT,
            amber_above_percent: Self::DEFAULT_AMBER_ABOVE_PERCENT,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct RawHealthThresholds {
    green_above_percent: u8,
    amber_above_percent: u8,
}

impl Default for RawHealthThresholds {
    fn default() -> Self {
        HealthThresholds::default().into()
    }
}

impl From<HealthThresholds> for RawHealthThresholds {
    fn from(value: HealthThresholds) -> Self {
        Self {
            green_above_percent: value.green_above_percent,
            amber_above_percent: value.amber_above_percent,
        }
    }
}

impl TryFrom<RawHealthThresholds> for HealthThresholds {
    type Error = ProjectDomainError;

    fn try_from(value: RawHealthThresholds) -> Result<Self, Self::Error> {
        Self::new(value.green_above_percent, value.amber_above_percent)
    }
}

/// Computes a project's RAG status with the default thresholds.
///
/// `total_tasks` and `completed_tasks` are the project's task counts and
/// `today` is the reference date. Pure; identical inputs always give the
/// same answer.
#[must_use]
pub fn compute_rag(
    project: &Project,
    total_tasks: usize,
    completed_tasks: usize,
    today: NaiveDate,
) -> RagStatus {
    HealthThresholds::default().rag_for(
        project,
        TaskProgress::new(total_tasks, completed_tasks),
        today,
    )
}
