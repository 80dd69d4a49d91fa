//! Store configuration.

use chrono::{FixedOffset, Offset, Utc};

/// Slot name the schedule snapshot is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "kira-schedule-v1";

/// Runtime settings for a `ScheduleService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Key of the durable slot holding the snapshot.
    pub storage_key: String,
    /// Offset used to resolve "which day" questions and local clock times.
    pub display_offset: FixedOffset,
    /// Seed demonstration content when the slot is empty.
    pub seed_demo: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            display_offset: Utc.fix(),
            seed_demo: true,
        }
    }
}

impl ScheduleConfig {
    /// Returns a copy using `minutes` east of UTC as display offset.
    ///
    /// Returns `None` when the offset is outside +/-24h.
    pub fn with_offset_minutes(mut self, minutes: i32) -> Option<Self> {
        self.display_offset = FixedOffset::east_opt(minutes.checked_mul(60)?)?;
        Some(self)
    }
}
