//! studyplan-core
//!
//! Pure domain types for the study planner: goals, learnings, stored
//! schedules, schedule requests and the typed view of a generated schedule.
//! No I/O. This is the shared vocabulary of the other crates.

pub mod error;
pub mod models;
