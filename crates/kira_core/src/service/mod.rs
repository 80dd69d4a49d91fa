//! Use-case services.
//!
//! # Responsibility
//! - Own the schedule aggregate and expose its command/query surface.
//! - Orchestrate validation, invariant checks and persistence.
//!
//! # Invariants
//! - Service APIs never bypass validation or the overlap check.
//! - Service layer remains storage-agnostic.

pub mod clock;
pub mod schedule_service;
