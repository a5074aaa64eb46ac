//! Shared world state for lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use crate::test_helpers::{FixedClock, date};
use keystone::{
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::Project,
        services::{ProjectLifecycleError, ProjectLifecycleService},
    },
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::Task,
        services::{TaskLifecycleError, TaskLifecycleService},
    },
};
use rstest::fixture;

/// Task service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryProjectRepository, FixedClock>;
/// Project service type used by the BDD world.
pub type TestProjectService =
    ProjectLifecycleService<InMemoryProjectRepository, InMemoryTaskRepository, FixedClock>;

/// Scenario world for lifecycle behaviour tests.
pub struct LifecycleWorld {
    pub tasks: TestTaskService,
    pub projects: TestProjectService,
    pub project: Option<Project>,
    pub named_tasks: HashMap<String, Task>,
    pub last_task_result: Option<Result<Task, TaskLifecycleError>>,
    pub last_close_result: Option<Result<Project, ProjectLifecycleError>>,
}

impl LifecycleWorld {
    /// Creates a world with empty repositories.
    #[must_use]
    pub fn new() -> Self {
        let task_repo = Arc::new(InMemoryTaskRepository::new());
        let project_repo = Arc::new(InMemoryProjectRepository::new());
        let clock = Arc::new(FixedClock::on(date(2024, 1, 1)));

        Self {
            tasks: TaskLifecycleService::new(
                Arc::clone(&task_repo),
                Arc::clone(&project_repo),
                Arc::clone(&clock),
            ),
            projects: ProjectLifecycleService::new(project_repo, task_repo, clock),
            project: None,
            named_tasks: HashMap::new(),
            last_task_result: None,
            last_close_result: None,
        }
    }

    /// Returns the scenario project.
    ///
    /// # Errors
    ///
    /// Returns an error when no project has been created yet.
    pub fn project(&self) -> Result<&Project, eyre::Report> {
        self.project
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Returns a task by its scenario name.
    ///
    /// # Errors
    ///
    /// Returns an error when no task with that name exists.
    pub fn task(&self, name: &str) -> Result<&Task, eyre::Report> {
        self.named_tasks
            .get(name)
            .ok_or_else(|| eyre::eyre!("missing task {name} in scenario world"))
    }
}

impl Default for LifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
