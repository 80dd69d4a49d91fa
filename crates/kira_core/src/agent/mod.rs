//! Agent tool-call surface.
//!
//! # Responsibility
//! - Decode LLM tool-call arguments into typed store commands.
//! - Run them through the same `ScheduleService` commands the UI uses.
//!
//! # Invariants
//! - Argument errors are reported before any store invariant is checked.
//! - Argument errors and store rejections stay distinguishable.

pub mod tool_call;
