//! In-memory integration tests for project closure and health.

use super::helpers::{Workspace, valid_actuals, workspace};
use crate::test_helpers::date;
use keystone::project::{
    domain::{ProjectDomainError, ProjectStatus, RagStatus},
    services::{CloseProjectRequest, ProjectLifecycleError},
};
use keystone::task::{
    domain::Priority,
    services::{CompleteTaskRequest, CreateTaskRequest, TaskLifecycleError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_closes_once_every_task_is_completed(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let project = workspace
        .project("Museum wing", date(2024, 1, 1), date(2024, 4, 10))
        .await?;
    let first = workspace.assigned_task(&project, "Foundations").await?;
    let second = workspace.assigned_task(&project, "Roof").await?;
    workspace
        .tasks
        .complete(CompleteTaskRequest::new(first.id()).with_actuals(valid_actuals()))
        .await?;

    let refused = workspace
        .projects
        .close(CloseProjectRequest::new(project.id()))
        .await;
    eyre::ensure!(
        matches!(
            refused,
            Err(ProjectLifecycleError::Domain(
                ProjectDomainError::IncompleteTasks { .. }
            ))
        ),
        "expected open tasks to block closure, got {refused:?}"
    );
    let still_open = workspace.projects.find_by_id(project.id()).await?;
    eyre::ensure!(
        still_open.map(|stored| stored.status()) == Some(ProjectStatus::New),
        "refused closure must not change the status"
    );

    workspace
        .tasks
        .complete(CompleteTaskRequest::new(second.id()).with_actuals(valid_actuals()))
        .await?;
    let closed = workspace
        .projects
        .close(CloseProjectRequest::new(project.id()))
        .await?;

    assert_eq!(closed.status(), ProjectStatus::Closed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closed_project_rejects_task_changes(workspace: Workspace) -> Result<(), eyre::Report> {
    let project = workspace
        .project("Chapel", date(2024, 1, 1), date(2024, 2, 1))
        .await?;
    workspace
        .projects
        .close(CloseProjectRequest::new(project.id()))
        .await?;

    let result = workspace
        .tasks
        .create_task(CreateTaskRequest::new(project.id(), "Bell", Priority::Low))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Project(ProjectDomainError::ProjectClosed(_)))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_tracks_tasks_and_closure() -> Result<(), eyre::Report> {
    // 2024-03-16 leaves 25 of 100 days.
    let workspace = Workspace::on(date(2024, 3, 16));
    let project = workspace
        .project("Clock tower", date(2024, 1, 1), date(2024, 4, 10))
        .await?;

    assert_eq!(workspace.projects.health(project.id()).await?, RagStatus::Amber);

    let task = workspace.assigned_task(&project, "Gears").await?;
    assert_eq!(workspace.projects.health(project.id()).await?, RagStatus::Red);

    workspace
        .tasks
        .complete(CompleteTaskRequest::new(task.id()).with_actuals(valid_actuals()))
        .await?;
    assert_eq!(workspace.projects.health(project.id()).await?, RagStatus::Green);

    workspace
        .projects
        .close(CloseProjectRequest::new(project.id()))
        .await?;
    assert_eq!(workspace.projects.health(project.id()).await?, RagStatus::Green);
    Ok(())
}
