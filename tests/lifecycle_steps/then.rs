//! Then steps for lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use keystone::{
    project::{
        domain::{INCOMPLETE_TASKS_REASON, ProjectDomainError, ProjectStatus},
        services::ProjectLifecycleError,
    },
    task::{
        domain::{TaskDomainError, TaskStatus},
        services::TaskLifecycleError,
    },
};
use rstest_bdd_macros::then;

fn last_task_error(world: &LifecycleWorld) -> Result<&TaskLifecycleError, eyre::Report> {
    match world.last_task_result.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(task)) => Err(eyre::eyre!("expected failure, task {} succeeded", task.id())),
        None => Err(eyre::eyre!("missing task result")),
    }
}

#[then("the change fails with a circular dependency error")]
fn fails_with_cycle(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_task_error(world)?;
    if !matches!(
        err,
        TaskLifecycleError::Domain(TaskDomainError::CircularDependency { .. })
    ) {
        return Err(eyre::eyre!("expected CircularDependency, got {err:?}"));
    }
    Ok(())
}

#[then("the completion fails with a prerequisite incomplete error")]
fn fails_with_prerequisite(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_task_error(world)?;
    if !matches!(
        err,
        TaskLifecycleError::Domain(TaskDomainError::PrerequisiteIncomplete { .. })
    ) {
        return Err(eyre::eyre!("expected PrerequisiteIncomplete, got {err:?}"));
    }
    Ok(())
}

#[then("the completion fails with an invalid duration error")]
fn fails_with_duration(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_task_error(world)?;
    if !matches!(
        err,
        TaskLifecycleError::Domain(TaskDomainError::InvalidDuration { .. })
    ) {
        return Err(eyre::eyre!("expected InvalidDuration, got {err:?}"));
    }
    Ok(())
}

#[then(r#"task "{name}" has status "{status}""#)]
fn task_has_status(
    world: &LifecycleWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.task(&name)?.id();
    let stored = run_async(world.tasks.find_by_id(task_id))?
        .ok_or_else(|| eyre::eyre!("task {name} not stored"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then(r#"the project status is "{status}""#)]
fn project_has_status(world: &LifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = ProjectStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let project_id = world.project()?.id();
    let stored = run_async(world.projects.find_by_id(project_id))?
        .ok_or_else(|| eyre::eyre!("project not stored"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("closure fails because incomplete tasks exist")]
fn closure_refused(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_close_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing closure result"))?;

    let Err(err @ ProjectLifecycleError::Domain(ProjectDomainError::IncompleteTasks { .. })) =
        result
    else {
        return Err(eyre::eyre!("expected IncompleteTasks, got {result:?}"));
    };
    if !err.to_string().contains(INCOMPLETE_TASKS_REASON) {
        return Err(eyre::eyre!("unexpected closure message: {err}"));
    }
    Ok(())
}
