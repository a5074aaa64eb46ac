//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Workspace, valid_actuals, workspace};
use crate::test_helpers::date;
use keystone::task::{
    domain::{Priority, TaskDomainError, TaskStatus},
    services::{CompleteTaskRequest, CreateTaskRequest, TaskLifecycleError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dependent_task_completes_only_after_its_prerequisite(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let project = workspace
        .project("Dockyard", date(2024, 1, 1), date(2024, 3, 31))
        .await?;
    let a = workspace.assigned_task(&project, "Task A").await?;
    let b = workspace.assigned_task(&project, "Task B").await?;
    workspace.tasks.set_prerequisite(b.id(), Some(a.id())).await?;

    let reverse = workspace.tasks.set_prerequisite(a.id(), Some(b.id())).await;
    eyre::ensure!(
        matches!(
            reverse,
            Err(TaskLifecycleError::Domain(
                TaskDomainError::CircularDependency { .. }
            ))
        ),
        "expected a cycle to be detected, got {reverse:?}"
    );

    let early = workspace
        .tasks
        .complete(CompleteTaskRequest::new(b.id()).with_actuals(valid_actuals()))
        .await;
    eyre::ensure!(
        matches!(
            early,
            Err(TaskLifecycleError::Domain(
                TaskDomainError::PrerequisiteIncomplete { .. }
            ))
        ),
        "expected the prerequisite to block completion, got {early:?}"
    );

    workspace
        .tasks
        .complete(CompleteTaskRequest::new(a.id()).with_actuals(valid_actuals()))
        .await?;
    let completed = workspace
        .tasks
        .complete(CompleteTaskRequest::new(b.id()).with_actuals(valid_actuals()))
        .await?;

    assert_eq!(completed.status(), TaskStatus::Completed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn clearing_a_prerequisite_always_succeeds(workspace: Workspace) -> Result<(), eyre::Report> {
    let project = workspace
        .project("Dockyard", date(2024, 1, 1), date(2024, 3, 31))
        .await?;
    let a = workspace.assigned_task(&project, "Task A").await?;
    let b = workspace
        .tasks
        .create_task(
            CreateTaskRequest::new(project.id(), "Task B", Priority::Low).with_prerequisite(a.id()),
        )
        .await?;

    let cleared = workspace.tasks.set_prerequisite(b.id(), None).await?;

    assert_eq!(cleared.prereq_task_id(), None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn prerequisites_cannot_cross_projects(workspace: Workspace) -> Result<(), eyre::Report> {
    let north = workspace
        .project("North pier", date(2024, 1, 1), date(2024, 3, 31))
        .await?;
    let south = workspace
        .project("South pier", date(2024, 1, 1), date(2024, 3, 31))
        .await?;
    let north_task = workspace.assigned_task(&north, "Piles").await?;
    let south_task = workspace.assigned_task(&south, "Deck").await?;

    let result = workspace
        .tasks
        .set_prerequisite(south_task.id(), Some(north_task.id()))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::CrossProjectPrerequisite { .. }
        ))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassigning_a_completed_task_keeps_it_completed(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let project = workspace
        .project("Dockyard", date(2024, 1, 1), date(2024, 3, 31))
        .await?;
    let task = workspace.assigned_task(&project, "Crane").await?;
    workspace
        .tasks
        .complete(CompleteTaskRequest::new(task.id()).with_actuals(valid_actuals()))
        .await?;

    let cleared = workspace.tasks.assign(task.id(), None).await?;

    assert_eq!(cleared.status(), TaskStatus::Completed);
    assert_eq!(cleared.assigned_to(), None);
    Ok(())
}
