//! When steps for lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use crate::test_helpers::date;
use keystone::{
    project::services::CloseProjectRequest,
    task::{
        domain::{ActualProgress, WorkDuration},
        services::CompleteTaskRequest,
    },
};
use rstest_bdd_macros::when;

#[when(r#"task "{name}" is made to depend on "{prerequisite}""#)]
fn make_dependent(
    world: &mut LifecycleWorld,
    name: String,
    prerequisite: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task(&name)?.id();
    let prerequisite_id = world.task(&prerequisite)?.id();

    let result = run_async(world.tasks.set_prerequisite(task_id, Some(prerequisite_id)));
    world.last_task_result = Some(result);
    Ok(())
}

fn complete_with(
    world: &mut LifecycleWorld,
    name: String,
    actuals: ActualProgress,
) -> Result<(), eyre::Report> {
    let task_id = world.task(&name)?.id();
    let result = run_async(
        world
            .tasks
            .complete(CompleteTaskRequest::new(task_id).with_actuals(actuals)),
    );
    if let Ok(ref completed) = result {
        world.named_tasks.insert(name, completed.clone());
    }
    world.last_task_result = Some(result);
    Ok(())
}

#[when(r#"task "{name}" is completed with valid actuals"#)]
fn complete_task(world: &mut LifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let actuals =
        ActualProgress::new(date(2024, 2, 1), date(2024, 2, 3), WorkDuration::from_hours(5));
    complete_with(world, name, actuals)
}

#[when(r#"task "{name}" is completed without time spent"#)]
fn complete_task_without_time(
    world: &mut LifecycleWorld,
    name: String,
) -> Result<(), eyre::Report> {
    let actuals = ActualProgress {
        actual_start_date: Some(date(2024, 2, 1)),
        actual_end_date: Some(date(2024, 2, 3)),
        actual_time_to_complete: None,
    };
    complete_with(world, name, actuals)
}

#[when("the project is closed")]
fn close_project(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let result = run_async(world.projects.close(CloseProjectRequest::new(project_id)));
    world.last_close_result = Some(result);
    Ok(())
}
