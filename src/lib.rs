//! Taskboard: a small task-tracking backend.
//!
//! Users create tasks, hold roles on them, declare dependencies between
//! tasks and move tasks through a `new` → `in_progress` → `done` lifecycle.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (JSON file, memory)
//!
//! # Modules
//!
//! - [`board`]: Task and user model, state machine and orchestration
//! - [`http`]: JSON-over-HTTP boundary mapping requests onto the board
//! - [`config`]: Server configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod board;
pub mod config;
pub mod http;
pub mod telemetry;
