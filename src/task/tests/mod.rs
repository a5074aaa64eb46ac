//! Unit tests for the task lifecycle module.


use crate::project::domain::ProjectId;
use crate::task::domain::{ActualProgress, NewTask, PersistedTaskData, Priority, Task, TaskName};
use crate::test_support::FixedClock;

/// Builds an unassigned task in `project_id`.
fn task_in(project_id: ProjectId, name: &str) -> Task {
    let params = NewTask::new(
        project_id,
        TaskName::new(name).expect("valid task name"),
        Priority::Medium,
    );
    Task::new(params, &FixedClock::default()).expect("valid task")
}

/// Captures `task` as a persisted row carrying `actuals`.
fn snapshot_of(task: &Task, actuals: ActualProgress) -> PersistedTaskData {
    PersistedTaskData {
        id: task.id(),
        project_id: task.project_id(),
        name: task.name().clone(),
        details: task.details().map(str::to_owned),
        priority: task.priority(),
        status: task.status(),
        assigned_to: task.assigned_to(),
        prereq_task_id: task.prereq_task_id(),
        schedule: *task.schedule(),
        actuals,
        delay_reason: task.delay_reason().map(str::to_owned),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}
