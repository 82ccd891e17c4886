//! Adapter implementations for board ports.

pub mod json_file;
pub mod memory;
