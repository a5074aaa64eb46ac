//! Domain model for projects: status, schedule, closure and health.

mod closure;
mod error;
mod health;
mod ids;
mod project;

pub use closure::{ClosureDecision, ClosureGate, INCOMPLETE_TASKS_REASON};
pub use error::{ParseProjectStatusError, ParseRagStatusError, ProjectDomainError};
pub use health::{HealthThresholds, RagStatus, TaskProgress, compute_rag};
pub use ids::{ProjectId, ProjectName};
pub use project::{
    NewProject, PersistedProjectData, Project, ProjectDatePair, ProjectSchedule, ProjectStatus,
    ScheduleField,
};
