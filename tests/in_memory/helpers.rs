//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use crate::test_helpers::{FixedClock, date};
use chrono::NaiveDate;
use keystone::{
    project::{
        adapters::memory::InMemoryProjectRepository, domain::Project,
        services::{CreateProjectRequest, ProjectLifecycleService},
    },
    risk::{adapters::memory::InMemoryRiskRepository, services::RiskRegisterService},
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{ActualProgress, AssetId, Priority, Task, WorkDuration},
        services::{CreateTaskRequest, TaskLifecycleService},
    },
};
use rstest::fixture;

/// Task service over the shared in-memory repositories.
pub type TaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryProjectRepository, FixedClock>;
/// Project service over the shared in-memory repositories.
pub type ProjectService =
    ProjectLifecycleService<InMemoryProjectRepository, InMemoryTaskRepository, FixedClock>;
/// Risk service over the shared in-memory repositories.
pub type RiskService =
    RiskRegisterService<InMemoryRiskRepository, InMemoryProjectRepository, FixedClock>;

/// All three services wired to one set of repositories.
pub struct Workspace {
    pub tasks: TaskService,
    pub projects: ProjectService,
    pub risks: RiskService,
}

impl Workspace {
    /// Wires the services with a clock frozen on `today`.
    pub fn on(today: NaiveDate) -> Self {
        let task_repo = Arc::new(InMemoryTaskRepository::new());
        let project_repo = Arc::new(InMemoryProjectRepository::new());
        let risk_repo = Arc::new(InMemoryRiskRepository::new());
        let clock = Arc::new(FixedClock::on(today));

        Self {
            tasks: TaskLifecycleService::new(
                Arc::clone(&task_repo),
                Arc::clone(&project_repo),
                Arc::clone(&clock),
            ),
            projects: ProjectLifecycleService::new(
                Arc::clone(&project_repo),
                Arc::clone(&task_repo),
                Arc::clone(&clock),
            ),
            risks: RiskRegisterService::new(risk_repo, project_repo, clock),
        }
    }

    /// Creates a project with a baseline from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the project cannot be created.
    pub async fn project(
        &self,
        name: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Project, eyre::Report> {
        Ok(self
            .projects
            .create_project(CreateProjectRequest::new(name).with_baseline(start, end))
            .await?)
    }

    /// Creates an assigned task in `project`.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be created.
    pub async fn assigned_task(&self, project: &Project, name: &str) -> Result<Task, eyre::Report> {
        let request = CreateTaskRequest::new(project.id(), name, Priority::Medium)
            .with_assignee(AssetId::new());
        Ok(self.tasks.create_task(request).await?)
    }
}

/// Provides a workspace whose clock reads 2024-01-01.
#[fixture]
pub fn workspace() -> Workspace {
    Workspace::on(date(2024, 1, 1))
}

/// Actual dates and time spent that satisfy every completion rule.
pub fn valid_actuals() -> ActualProgress {
    ActualProgress::new(date(2024, 1, 2), date(2024, 1, 5), WorkDuration::from_hours(8))
}
