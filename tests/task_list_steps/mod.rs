//! Step definitions for task list projection scenarios.

pub mod given;
pub mod world;
