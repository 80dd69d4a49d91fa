//! Core schedule logic for Kira.
//! This crate is the single source of truth for calendar and task invariants.

pub mod agent;
pub mod config;
pub mod db;
pub mod layout;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use agent::tool_call::{dispatch, EventUpdates, ToolCall, ToolCallError, ToolOutput};
pub use config::{ScheduleConfig, DEFAULT_STORAGE_KEY};
pub use layout::lanes::{calculate_event_layout, EventLayout, EventPosition};
pub use layout::timeline::{current_time_marker, event_block, EventBlock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::day_pool::{DayPoolItem, DayPoolItemId};
pub use model::event::{CalendarEvent, EventDraft, EventId, EventKind, Palette};
pub use model::preferences::{PreferencesPatch, UserPreferences, WorkingHours};
pub use model::state::ScheduleState;
pub use model::task::{Task, TaskDraft, TaskId, TaskStatus};
pub use model::validation::ValidationError;
pub use repo::snapshot_repo::{
    MemorySnapshotRepository, RepoError, RepoResult, SnapshotRepository,
    SqliteSnapshotRepository,
};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::schedule_service::{LoadOutcome, OverlapError, ScheduleError, ScheduleService};

/// Minimal health-check API for smoke checks from hosts.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
