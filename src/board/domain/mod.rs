//! Domain model for the task board.
//!
//! Entities enforce their own invariants (state machine, dependency set,
//! assignee list); [`TaskBoard`] enforces the rules that need both users and
//! tasks in view. Nothing here performs I/O.

mod assignment;
mod board;
mod error;
mod ids;
mod role;
mod snapshot;
mod task;
mod user;

pub use assignment::Assignment;
pub use board::{TaskBoard, UserWithTasks};
pub use error::{BoardError, ParseRoleError, ParseTaskStateError, TaskDomainError};
pub use ids::{TaskId, UserAlias};
pub use role::Role;
pub use snapshot::{BoardSnapshot, InvalidSnapshotError};
pub use task::{PersistedTaskData, RoleAssignment, Task, TaskState};
pub use user::User;
