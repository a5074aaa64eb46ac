//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CompleteTaskRequest, CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
