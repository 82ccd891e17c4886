//! Application services for task board orchestration.

mod tracker;

pub use tracker::{
    AssignUserRequest, CreateTaskRequest, CreateUserRequest, ErrorKind, TaskTrackerError,
    TaskTrackerResult, TaskTrackerService, UpdateTaskStateRequest,
};
