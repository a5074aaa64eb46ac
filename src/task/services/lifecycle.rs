//! Service layer for task creation, assignment, dependencies and completion.
//!
//! Every mutation loads the task and its project, runs the domain rules on a
//! working copy and only writes back when they pass.

use crate::project::{
    domain::{Project, ProjectDomainError, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{
        ActualProgress, AssetId, NewTask, PrerequisiteGraph, Priority, Task, TaskDomainError,
        TaskId, TaskName, TaskSchedule,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    name: String,
    priority: Priority,
    details: Option<String>,
    schedule: TaskSchedule,
    assigned_to: Option<AssetId>,
    prerequisite: Option<TaskId>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(project_id: ProjectId, name: impl Into<String>, priority: Priority) -> Self {
        Self {
            project_id,
            name: name.into(),
            priority,
            details: None,
            schedule: TaskSchedule::new(),
            assigned_to: None,
            prerequisite: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Sets planned dates and estimate.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: TaskSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: AssetId) -> Self {
        self.assigned_to = Some(assignee);
        self
    }

    /// Sets the prerequisite task.
    #[must_use]
    pub const fn with_prerequisite(mut self, prerequisite: TaskId) -> Self {
        self.prerequisite = Some(prerequisite);
        self
    }
}

/// Request payload for completing a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteTaskRequest {
    task_id: TaskId,
    actuals: Option<ActualProgress>,
}

impl CompleteTaskRequest {
    /// Completes the task using the actuals already recorded on it.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            actuals: None,
        }
    }

    /// Records these actuals as part of the completion.
    #[must_use]
    pub const fn with_actuals(mut self, actuals: ActualProgress) -> Self {
        self.actuals = Some(actuals);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// A task rule rejected the mutation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The owning project rejected the mutation.
    #[error(transparent)]
    Project(#[from] ProjectDomainError),
    /// No task exists with the given identifier.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// No project exists with the given identifier.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project repository operation failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<T, P, C> TaskLifecycleService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            clock,
        }
    }

    /// Creates a task in an open project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the project is missing or closed,
    /// the task data is invalid, the prerequisite is unknown or invalid, or
    /// persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            project_id,
            name,
            priority,
            details,
            schedule,
            assigned_to,
            prerequisite,
        } = request;

        self.open_project(project_id).await?;

        let mut params = NewTask::new(project_id, TaskName::new(name)?, priority);
        params.details = details;
        params.schedule = schedule;
        params.assigned_to = assigned_to;
        let mut task = Task::new(params, &*self.clock)?;

        if let Some(prerequisite_id) = prerequisite {
            let candidate = self.find_or_error(prerequisite_id).await?;
            let graph = self.graph_for(project_id).await?;
            task.set_prerequisite(Some(&candidate), &graph, &*self.clock)?;
        }

        self.tasks.store(&task).await?;
        info!(
            task_id = %task.id(),
            project_id = %project_id,
            status = %task.status(),
            "task created"
        );
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.tasks.find_by_id(id).await?)
    }

    /// Lists every task of a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_by_project(&self, project_id: ProjectId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list_by_project(project_id).await?)
    }

    /// Sets or clears a task's prerequisite after checking for cycles.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::CircularDependency`] or
    /// [`TaskDomainError::CrossProjectPrerequisite`] wrapped in
    /// [`TaskLifecycleError::Domain`] when the edge is rejected; nothing is
    /// written in that case.
    pub async fn set_prerequisite(
        &self,
        task_id: TaskId,
        prerequisite: Option<TaskId>,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_or_error(task_id).await?;
        self.open_project(task.project_id()).await?;

        let candidate = match prerequisite {
            Some(id) => Some(self.find_or_error(id).await?),
            None => None,
        };
        let graph = self.graph_for(task.project_id()).await?;
        task.set_prerequisite(candidate.as_ref(), &graph, &*self.clock)
            .inspect_err(|err| warn!(task_id = %task_id, error = %err, "prerequisite rejected"))?;

        self.tasks.update(&task).await?;
        info!(task_id = %task_id, prerequisite = ?prerequisite, "prerequisite updated");
        Ok(task)
    }

    /// Sets or clears the assignee and applies the status automaton.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the task or project is missing,
    /// the project is closed, or persistence fails.
    pub async fn assign(
        &self,
        task_id: TaskId,
        assignee: Option<AssetId>,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_or_error(task_id).await?;
        self.open_project(task.project_id()).await?;

        let previous = task.status();
        let status = task.apply_assignment(assignee, &*self.clock);
        self.tasks.update(&task).await?;
        info!(task_id = %task_id, from = %previous, to = %status, "assignment applied");
        Ok(task)
    }

    /// Replaces a task's planned dates and estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the schedule is invalid, the task
    /// or project is missing, the project is closed, or persistence fails.
    pub async fn reschedule(
        &self,
        task_id: TaskId,
        schedule: TaskSchedule,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_or_error(task_id).await?;
        self.open_project(task.project_id()).await?;
        task.reschedule(schedule, &*self.clock)?;
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Records why a task slipped.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the task or project is missing,
    /// the project is closed, or persistence fails.
    pub async fn record_delay(
        &self,
        task_id: TaskId,
        reason: Option<String>,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_or_error(task_id).await?;
        self.open_project(task.project_id()).await?;
        task.set_delay_reason(reason, &*self.clock);
        self.tasks.update(&task).await?;
        Ok(task)
    }

    /// Completes an assigned task.
    ///
    /// Actuals supplied with the request are recorded in the same mutation.
    /// Nothing is written when any completion rule fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] carrying
    /// [`TaskDomainError::PrerequisiteIncomplete`],
    /// [`TaskDomainError::InvalidDateRange`] or
    /// [`TaskDomainError::InvalidDuration`] when the completion rules fail,
    /// and other variants for missing records, closed projects or
    /// persistence failures.
    pub async fn complete(&self, request: CompleteTaskRequest) -> TaskLifecycleResult<Task> {
        let mut task = self.find_or_error(request.task_id).await?;
        self.open_project(task.project_id()).await?;

        let prerequisite = match task.prereq_task_id() {
            Some(id) => self.tasks.find_by_id(id).await?,
            None => None,
        };

        if let Some(actuals) = request.actuals {
            task.record_actuals(actuals, &*self.clock)?;
        }
        task.complete(prerequisite.as_ref(), &*self.clock)
            .inspect_err(|err| {
                warn!(task_id = %request.task_id, error = %err, "completion rejected");
            })?;

        self.tasks.update(&task).await?;
        info!(task_id = %task.id(), project_id = %task.project_id(), "task completed");
        Ok(task)
    }

    async fn find_or_error(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(id))
    }

    async fn open_project(&self, id: ProjectId) -> TaskLifecycleResult<()> {
        let project: Project = self
            .projects
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::ProjectNotFound(id))?;
        project.ensure_open()?;
        Ok(())
    }

    async fn graph_for(&self, project_id: ProjectId) -> TaskLifecycleResult<PrerequisiteGraph> {
        let tasks = self.tasks.list_by_project(project_id).await?;
        Ok(PrerequisiteGraph::from_tasks(&tasks))
    }
}
