//! Durable slot abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value contract the schedule store persists through.
//! - Isolate SQLite details from service orchestration.
//!
//! # Invariants
//! - A slot holds one opaque string; encoding is the caller's concern.
//! - Writes replace the previous value atomically.

pub mod snapshot_repo;
