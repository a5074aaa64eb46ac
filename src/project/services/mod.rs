//! Application services for project lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CloseProjectRequest, CreateProjectRequest, ProjectLifecycleError, ProjectLifecycleResult,
    ProjectLifecycleService,
};
