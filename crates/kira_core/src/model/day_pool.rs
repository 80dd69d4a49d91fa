//! Day pool: tasks pulled into a specific calendar day for focus.
//!
//! # Invariants
//! - `task_id` is a weak reference; the task may be deleted independently,
//!   leaving the item orphaned. Readers skip orphans.
//! - `date` is an instant; the day it belongs to is resolved in the display
//!   offset, the same way event starts are.
//! - `order` is the pool length at insertion time, so it is global to the
//!   session rather than per day. Equal orders keep insertion order.

pub use crate::model::id::DayPoolItemId;
use crate::model::task::TaskId;
use crate::model::time::local_day;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPoolItem {
    pub id: DayPoolItemId,
    pub task_id: TaskId,
    pub date: DateTime<Utc>,
    pub order: u32,
}

impl DayPoolItem {
    pub fn new(task_id: TaskId, date: DateTime<Utc>, order: u32) -> Self {
        Self {
            id: DayPoolItemId::generate(),
            task_id,
            date,
            order,
        }
    }

    /// Whether the item is planned for `day` as seen in `offset`.
    pub fn is_on(&self, day: NaiveDate, offset: FixedOffset) -> bool {
        local_day(self.date, offset) == day
    }
}
