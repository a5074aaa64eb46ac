//! Domain model for tasks inside a project.
//!
//! Covers the task status automaton, prerequisite cycle prevention and the
//! completion rules. Nothing here performs I/O; callers hand in snapshots
//! loaded through the repository ports.

mod dependency;
mod error;
mod ids;
mod schedule;
mod task;

pub use dependency::PrerequisiteGraph;
pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{AssetId, TaskId, TaskName};
pub use schedule::{ActualProgress, DatePair, DurationField, TaskSchedule, WorkDuration};
pub use task::{NewTask, PersistedTaskData, Priority, Task, TaskStatus};
