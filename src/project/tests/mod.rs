//! Unit tests for the project lifecycle module.


use crate::project::domain::{NewProject, Project, ProjectId, ProjectName};
use crate::task::domain::{
    ActualProgress, PersistedTaskData, Priority, Task, TaskId, TaskName, TaskSchedule, TaskStatus,
    WorkDuration,
};
use crate::test_support::FixedClock;
use chrono::{DateTime, NaiveDate, Utc};

/// Builds a new project with optional baseline dates.
fn project_named(name: &str, baseline: Option<(NaiveDate, NaiveDate)>) -> Project {
    let mut params = NewProject::new(ProjectName::new(name).expect("valid project name"));
    if let Some((start, end)) = baseline {
        params.planned_start_date = Some(start);
        params.original_target_end_date = Some(end);
    }
    Project::new(params, &FixedClock::default()).expect("valid project")
}

/// Restores a task snapshot in the given status.
fn task_with_status(project_id: ProjectId, status: TaskStatus) -> Task {
    let timestamp = DateTime::<Utc>::UNIX_EPOCH;
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        project_id,
        name: TaskName::new("Snapshot").expect("valid task name"),
        details: None,
        priority: Priority::Medium,
        status,
        assigned_to: None,
        prereq_task_id: None,
        schedule: TaskSchedule::new(),
        actuals: ActualProgress::new(
            NaiveDate::MIN,
            NaiveDate::MIN,
            WorkDuration::from_hours(1),
        ),
        delay_reason: None,
        created_at: timestamp,
        updated_at: timestamp,
    })
    .expect("consistent task snapshot")
}
