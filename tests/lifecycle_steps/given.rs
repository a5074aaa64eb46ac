//! Given steps for lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use crate::test_helpers::date;
use eyre::WrapErr;
use keystone::{
    project::services::CreateProjectRequest,
    task::{
        domain::{ActualProgress, AssetId, Priority, WorkDuration},
        services::{CompleteTaskRequest, CreateTaskRequest},
    },
};
use rstest_bdd_macros::given;

#[given(r#"a project named "{name}""#)]
fn project_named(world: &mut LifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let request =
        CreateProjectRequest::new(name).with_baseline(date(2024, 1, 1), date(2024, 6, 30));
    let project = run_async(world.projects.create_project(request))
        .wrap_err("create project for scenario")?;
    world.project = Some(project);
    Ok(())
}

#[given(r#"an assigned task "{name}""#)]
fn assigned_task(world: &mut LifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let request = CreateTaskRequest::new(project_id, name.clone(), Priority::Medium)
        .with_assignee(AssetId::new());
    let task = run_async(world.tasks.create_task(request)).wrap_err("create assigned task")?;
    world.named_tasks.insert(name, task);
    Ok(())
}

#[given(r#"a dependent task "{name}" requiring "{prerequisite}""#)]
fn dependent_task(
    world: &mut LifecycleWorld,
    name: String,
    prerequisite: String,
) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let prerequisite_id = world.task(&prerequisite)?.id();
    let request = CreateTaskRequest::new(project_id, name.clone(), Priority::Medium)
        .with_assignee(AssetId::new())
        .with_prerequisite(prerequisite_id);
    let task = run_async(world.tasks.create_task(request)).wrap_err("create dependent task")?;
    world.named_tasks.insert(name, task);
    Ok(())
}

#[given("{count:u64} completed tasks in the project")]
fn completed_tasks(world: &mut LifecycleWorld, count: u64) -> Result<(), eyre::Report> {
    let project_id = world.project()?.id();
    let actuals =
        ActualProgress::new(date(2024, 1, 2), date(2024, 1, 3), WorkDuration::from_hours(2));

    for index in 0..count {
        let name = format!("Completed {index}");
        let request = CreateTaskRequest::new(project_id, name.clone(), Priority::Low)
            .with_assignee(AssetId::new());
        let task = run_async(world.tasks.create_task(request)).wrap_err("create task")?;
        let completed = run_async(
            world
                .tasks
                .complete(CompleteTaskRequest::new(task.id()).with_actuals(actuals)),
        )
        .wrap_err("complete task in scenario setup")?;
        world.named_tasks.insert(name, completed);
    }
    Ok(())
}
