//! Schedule domain model.
//!
//! # Responsibility
//! - Define canonical data structures shared by the store, the layout engine
//!   and the agent tool-call layer.
//! - Own field-level validation so every write path checks the same rules.
//!
//! # Invariants
//! - Every domain object is identified by an opaque string id; new ids are
//!   generated as uuid v4 strings.
//! - Instants are stored in UTC; calendar days are resolved against an
//!   explicit display offset.

pub mod day_pool;
pub mod event;
pub mod id;
pub mod preferences;
pub mod state;
pub mod task;
pub mod time;
pub mod validation;
