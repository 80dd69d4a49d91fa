//! Aggregate schedule state and its snapshot encoding.
//!
//! # Responsibility
//! - Hold events, tasks, day pool and preferences as one aggregate root.
//! - Encode/decode the single JSON blob written to the durable slot.
//!
//! # Invariants
//! - Snapshot keys are camelCase (`dayPool`, `workingHours`, `createdAt`).
//! - Instants (including day-pool dates) round-trip as RFC 3339 strings.
//! - Ids are read as opaque strings, so snapshots with short legacy ids load.
//! - A snapshot without `dayPool` or `preferences` decodes with defaults.

use crate::model::day_pool::DayPoolItem;
use crate::model::event::{CalendarEvent, EventDraft, EventKind};
use crate::model::preferences::UserPreferences;
use crate::model::task::{Task, TaskDraft};
use crate::model::time::local_instant;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleState {
    pub events: Vec<CalendarEvent>,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub day_pool: Vec<DayPoolItem>,
    #[serde(default)]
    pub preferences: UserPreferences,
}

impl ScheduleState {
    /// Demonstration content used when no snapshot exists yet.
    ///
    /// Two work events on `today` (09:00-11:30 and 14:00-15:00 local time in
    /// `offset`) and three open tasks; the day pool starts empty.
    pub fn demo(today: NaiveDate, offset: FixedOffset, now: DateTime<Utc>) -> Self {
        let events = [
            ("Deep Work", (9, 0), (11, 30)),
            ("Team Sync", (14, 0), (15, 0)),
        ]
        .into_iter()
        .filter_map(|(title, (start_h, start_m), (end_h, end_m))| {
            let start = local_instant(today, start_h, start_m, offset)?;
            let end = local_instant(today, end_h, end_m, offset)?;
            Some(CalendarEvent::from_draft(EventDraft::new(title, start, end)))
        })
        .collect();
        let tasks = [
            ("Review quarterly goals", EventKind::Work),
            ("Buy groceries for dinner", EventKind::Personal),
            ("Call Mom", EventKind::Social),
        ]
        .into_iter()
        .map(|(title, tag)| Task::from_draft(TaskDraft::new(title, tag), now))
        .collect();

        Self {
            events,
            tasks,
            day_pool: Vec::new(),
            preferences: UserPreferences::default(),
        }
    }

    /// Drops events that break the store invariants and returns them.
    ///
    /// Events are kept in stored order; an event is dropped when its window
    /// is invalid or it overlaps an event already kept.
    pub fn retain_consistent_events(&mut self) -> Vec<CalendarEvent> {
        let mut kept: Vec<CalendarEvent> = Vec::with_capacity(self.events.len());
        let mut dropped = Vec::new();
        for event in std::mem::take(&mut self.events) {
            let consistent = event.validate().is_ok()
                && !kept.iter().any(|other| event.overlaps(other));
            if consistent {
                kept.push(event);
            } else {
                dropped.push(event);
            }
        }
        self.events = kept;
        dropped
    }

    /// Encodes the state as the persisted JSON snapshot.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes a persisted JSON snapshot.
    pub fn from_snapshot(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
