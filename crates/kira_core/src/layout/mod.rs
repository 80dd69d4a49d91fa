//! Day-view geometry.
//!
//! # Responsibility
//! - Pack temporally overlapping events into side-by-side lanes.
//! - Map events and the current time onto the vertical minute grid.
//!
//! # Invariants
//! - Functions here are pure; they read events and never mutate the store.
//! - Events in the same cluster never share a lane with an overlapping event.

pub mod lanes;
pub mod timeline;
