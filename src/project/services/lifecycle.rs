//! Service layer for project creation, status changes, closure and health.

use crate::project::{
    domain::{
        ClosureDecision, ClosureGate, HealthThresholds, NewProject, Project, ProjectDomainError,
        ProjectId, ProjectName, ProjectSchedule, ProjectStatus, RagStatus, TaskProgress,
    },
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{AssetId, Priority},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
    planned_start_date: Option<NaiveDate>,
    original_target_end_date: Option<NaiveDate>,
    owner: Option<AssetId>,
    priority: Option<Priority>,
}

impl CreateProjectRequest {
    /// Creates a request with the project name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            planned_start_date: None,
            original_target_end_date: None,
            owner: None,
            priority: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the baseline dates.
    #[must_use]
    pub const fn with_baseline(mut self, planned_start: NaiveDate, target_end: NaiveDate) -> Self {
        self.planned_start_date = Some(planned_start);
        self.original_target_end_date = Some(target_end);
        self
    }

    /// Sets the owner.
    #[must_use]
    pub const fn with_owner(mut self, owner: AssetId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Request payload for closing a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseProjectRequest {
    project_id: ProjectId,
    actual_start_date: Option<NaiveDate>,
    actual_end_date: Option<NaiveDate>,
}

impl CloseProjectRequest {
    /// Creates a request that closes the project without touching dates.
    #[must_use]
    pub const fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            actual_start_date: None,
            actual_end_date: None,
        }
    }

    /// Records actual dates in the same mutation.
    #[must_use]
    pub const fn with_actual_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.actual_start_date = Some(start);
        self.actual_end_date = Some(end);
        self
    }
}

/// Service-level errors for project lifecycle operations.
#[derive(Debug, Error)]
pub enum ProjectLifecycleError {
    /// A project rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// No project exists with the given identifier.
    #[error("project not found: {0}")]
    NotFound(ProjectId),
    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}

/// Result type for project lifecycle service operations.
pub type ProjectLifecycleResult<T> = Result<T, ProjectLifecycleError>;

/// Project lifecycle orchestration service.
#[derive(Clone)]
pub struct ProjectLifecycleService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<C>,
    thresholds: HealthThresholds,
}

impl<P, T, C> ProjectLifecycleService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project lifecycle service with default health
    /// thresholds.
    #[must_use]
    pub fn new(projects: Arc<P>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            projects,
            tasks,
            clock,
            thresholds: HealthThresholds::default(),
        }
    }

    /// Replaces the health thresholds used by [`Self::health`].
    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: HealthThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Creates a project with status `New`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Domain`] for an invalid name or
    /// baseline, or [`ProjectLifecycleError::Repository`] when the name is
    /// taken or persistence fails.
    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> ProjectLifecycleResult<Project> {
        let CreateProjectRequest {
            name,
            description,
            planned_start_date,
            original_target_end_date,
            owner,
            priority,
        } = request;

        let params = NewProject {
            name: ProjectName::new(name)?,
            description,
            planned_start_date,
            original_target_end_date,
            owner,
            priority,
        };
        let project = Project::new(params, &*self.clock)?;
        self.projects.store(&project).await?;
        info!(project_id = %project.id(), name = %project.name(), "project created");
        Ok(project)
    }

    /// Finds a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: ProjectId) -> ProjectLifecycleResult<Option<Project>> {
        Ok(self.projects.find_by_id(id).await?)
    }

    /// Finds a project by name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Domain`] when the name is invalid or
    /// [`ProjectLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_name(&self, name: &str) -> ProjectLifecycleResult<Option<Project>> {
        let project_name = ProjectName::new(name)?;
        Ok(self.projects.find_by_name(&project_name).await?)
    }

    /// Lists every project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Repository`] when lookup fails.
    pub async fn list_all(&self) -> ProjectLifecycleResult<Vec<Project>> {
        Ok(self.projects.list_all().await?)
    }

    /// Changes the status of an open project to anything but `Closed`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Domain`] when the project is closed
    /// or `status` is `Closed`, and other variants for lookup or
    /// persistence failures.
    pub async fn change_status(
        &self,
        id: ProjectId,
        status: ProjectStatus,
    ) -> ProjectLifecycleResult<Project> {
        let mut project = self.find_or_error(id).await?;
        project.change_status(status, &*self.clock)?;
        self.projects.update(&project).await?;
        info!(project_id = %id, status = %status, "project status changed");
        Ok(project)
    }

    /// Replaces the dates of an open project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Domain`] when a baseline date is
    /// changed, a range is reversed or the project is closed.
    pub async fn update_schedule(
        &self,
        id: ProjectId,
        schedule: ProjectSchedule,
    ) -> ProjectLifecycleResult<Project> {
        let mut project = self.find_or_error(id).await?;
        project.update_schedule(schedule, &*self.clock)?;
        self.projects.update(&project).await?;
        Ok(project)
    }

    /// Reports whether the project could be closed right now.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError`] when the project is missing or
    /// lookup fails.
    pub async fn closure_decision(&self, id: ProjectId) -> ProjectLifecycleResult<ClosureDecision> {
        let project = self.find_or_error(id).await?;
        let tasks = self.tasks.list_by_project(id).await?;
        Ok(ClosureGate::evaluate(&project, &tasks))
    }

    /// Closes a project once all its tasks are completed.
    ///
    /// Actual dates supplied with the request are recorded in the same
    /// mutation. Nothing is written when closure is refused.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::IncompleteTasks`] wrapped in
    /// [`ProjectLifecycleError::Domain`] while tasks remain open, and other
    /// variants for invalid dates, closed or missing projects and
    /// persistence failures.
    pub async fn close(&self, request: CloseProjectRequest) -> ProjectLifecycleResult<Project> {
        let CloseProjectRequest {
            project_id,
            actual_start_date,
            actual_end_date,
        } = request;

        let mut project = self.find_or_error(project_id).await?;
        let tasks = self.tasks.list_by_project(project_id).await?;

        if actual_start_date.is_some() || actual_end_date.is_some() {
            project.record_actual_dates(actual_start_date, actual_end_date, &*self.clock)?;
        }
        project.close(&tasks, &*self.clock).inspect_err(|err| {
            warn!(project_id = %project_id, error = %err, "project closure refused");
        })?;

        self.projects.update(&project).await?;
        info!(project_id = %project_id, tasks = tasks.len(), "project closed");
        Ok(project)
    }

    /// Computes the RAG status of a project as of the clock's current date.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError`] when the project is missing or
    /// lookup fails.
    pub async fn health(&self, id: ProjectId) -> ProjectLifecycleResult<RagStatus> {
        let project = self.find_or_error(id).await?;
        let tasks = self.tasks.list_by_project(id).await?;
        let progress = TaskProgress::from_tasks(&tasks);
        let today = self.clock.utc().date_naive();

        let status = self.thresholds.rag_for(&project, progress, today);
        debug!(
            project_id = %id,
            total = progress.total,
            completed = progress.completed,
            %today,
            rag = %status,
            "project health computed"
        );
        Ok(status)
    }

    async fn find_or_error(&self, id: ProjectId) -> ProjectLifecycleResult<Project> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or(ProjectLifecycleError::NotFound(id))
    }
}
