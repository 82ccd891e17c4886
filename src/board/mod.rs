//! Task board: users, tasks, roles, dependencies and lifecycle.
//!
//! Users create tasks, assign each other under roles, declare dependencies
//! between tasks and move tasks through a fixed lifecycle. Every accepted
//! mutation is persisted as a whole-board snapshot. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
