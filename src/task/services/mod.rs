//! Orchestration services for the task lifecycle.

pub mod lifecycle;
pub mod regeneration;

pub use lifecycle::{
    BulkTransition, CreateTaskRequest, EditTaskRequest, StatusTransition, TaskLifecycleError,
    TaskLifecycleResult, TaskLifecycleService,
};
pub use regeneration::{
    RecurringRegenerationService, RegenerationError, RegenerationReport, RegenerationResult,
};
