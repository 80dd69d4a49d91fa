//! Vertical placement on the day grid.
//!
//! The grid has one 60-minute row per working hour starting at
//! `WorkingHours::start`, so one minute maps to one grid unit.

use crate::model::event::CalendarEvent;
use crate::model::preferences::WorkingHours;
use crate::model::time::{local_day, local_hour_minute};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Vertical extent of one event, in minutes from the top of the grid.
///
/// `top` is negative for events starting before the first visible hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBlock {
    pub top: i64,
    pub height: i64,
}

pub fn event_block(event: &CalendarEvent, hours: &WorkingHours, offset: FixedOffset) -> EventBlock {
    let (hour, minute) = local_hour_minute(event.start, offset);
    let top = (i64::from(hour) - i64::from(hours.start)) * 60 + i64::from(minute);
    EventBlock {
        top,
        height: event.duration().num_minutes(),
    }
}

/// Position of the "now" marker, or `None` when it is not visible.
///
/// Hidden when `now` falls on another day than `day`, or when its hour lies
/// outside `hours.start..=hours.end`.
pub fn current_time_marker(
    now: DateTime<Utc>,
    day: NaiveDate,
    hours: &WorkingHours,
    offset: FixedOffset,
) -> Option<u32> {
    if local_day(now, offset) != day {
        return None;
    }
    let (hour, minute) = local_hour_minute(now, offset);
    let start = u32::from(hours.start);
    if hour < start || hour > u32::from(hours.end) {
        return None;
    }
    Some((hour - start) * 60 + minute)
}
