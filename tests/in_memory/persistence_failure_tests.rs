//! Repository failures propagate through the services untouched.

use std::io;
use std::sync::Arc;

use crate::test_helpers::{FixedClock, date};
use async_trait::async_trait;
use keystone::project::{
    domain::{NewProject, Project, ProjectId, ProjectName},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
    services::{CloseProjectRequest, ProjectLifecycleError, ProjectLifecycleService},
};
use keystone::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Priority,
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService},
};
use mockall::mock;
use rstest::rstest;

mock! {
    pub Projects {}

    #[async_trait]
    impl ProjectRepository for Projects {
        async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;
        async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;
        async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;
        async fn find_by_name(
            &self,
            name: &ProjectName,
        ) -> ProjectRepositoryResult<Option<Project>>;
        async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>>;
    }
}

fn store_offline() -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(io::Error::other("store offline"))
}

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::on(date(2024, 1, 1)))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_lookup_failure_aborts_task_creation() -> Result<(), eyre::Report> {
    let mut projects = MockProjects::new();
    projects
        .expect_find_by_id()
        .times(1)
        .returning(|_| Err(store_offline()));
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let service = TaskLifecycleService::new(Arc::clone(&tasks), Arc::new(projects), clock());

    let result = service
        .create_task(CreateTaskRequest::new(ProjectId::new(), "Stranded", Priority::Low))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::ProjectRepository(
                ProjectRepositoryError::Persistence(_)
            ))
        ),
        "expected the persistence error to surface, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_write_is_reported_after_a_successful_closure_check() -> Result<(), eyre::Report> {
    let project = Project::new(
        NewProject::new(ProjectName::new("Fragile")?),
        &FixedClock::on(date(2024, 1, 1)),
    )?;
    let project_id = project.id();

    let mut projects = MockProjects::new();
    projects
        .expect_find_by_id()
        .returning(move |_| Ok(Some(project.clone())));
    projects
        .expect_update()
        .times(1)
        .returning(|_| Err(store_offline()));
    let service = ProjectLifecycleService::new(
        Arc::new(projects),
        Arc::new(InMemoryTaskRepository::new()),
        clock(),
    );

    let result = service.close(CloseProjectRequest::new(project_id)).await;

    let Err(ProjectLifecycleError::Repository(ProjectRepositoryError::Persistence(source))) =
        &result
    else {
        return Err(eyre::eyre!("expected a persistence error, got {result:?}"));
    };
    assert_eq!(source.to_string(), "store offline");
    Ok(())
}
