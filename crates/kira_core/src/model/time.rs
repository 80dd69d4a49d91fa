//! Calendar-day helpers over UTC instants.
//!
//! The store keeps every instant in UTC. Views ask questions like "which
//! events start on this day" in the user's display offset, so conversions
//! live here instead of being repeated at each call site.

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};

/// Returns the calendar day `instant` falls on in `offset`.
pub fn local_day(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Returns `(hour, minute)` of `instant` in `offset`.
pub fn local_hour_minute(instant: DateTime<Utc>, offset: FixedOffset) -> (u32, u32) {
    let local = instant.with_timezone(&offset);
    (local.hour(), local.minute())
}

/// Returns the UTC instant for `hour:minute` on `day` in `offset`.
///
/// Minutes past 59 roll over into the following hours, so callers can pass
/// offsets like `(11, 30)` or `(0, 690)` interchangeably. `None` when the
/// result falls outside the representable range.
pub fn local_instant(
    day: NaiveDate,
    hour: u32,
    minute: u32,
    offset: FixedOffset,
) -> Option<DateTime<Utc>> {
    let minutes = i64::from(hour) * 60 + i64::from(minute);
    let local = day
        .and_time(NaiveTime::default())
        .checked_add_signed(Duration::minutes(minutes))?;
    local_to_utc(local, offset)
}

/// Reads a wall-clock `local` time in `offset`; `None` on range overflow.
pub fn local_to_utc(local: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let utc = local.checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))?;
    Some(Utc.from_utc_datetime(&utc))
}

#[cfg(test)]
mod tests {
    use super::{local_day, local_hour_minute, local_instant, local_to_utc};
    use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

    #[test]
    fn local_day_respects_offset() {
        let instant = Utc.with_ymd_and_hms(2026, 10, 18, 23, 30, 0).unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(
            local_day(instant, tokyo),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
        );
        assert_eq!(local_hour_minute(instant, tokyo), (8, 30));
    }

    #[test]
    fn local_instant_converts_back_to_utc() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let berlin_summer = FixedOffset::east_opt(2 * 3600).unwrap();
        let instant = local_instant(day, 9, 0, berlin_summer).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2026, 10, 18, 7, 0, 0).unwrap());

        let rolled = local_instant(day, 0, 690, FixedOffset::east_opt(0).unwrap()).unwrap();
        assert_eq!(rolled, Utc.with_ymd_and_hms(2026, 10, 18, 11, 30, 0).unwrap());
    }

    #[test]
    fn conversions_at_the_edge_of_the_calendar_return_none() {
        let west = FixedOffset::west_opt(3600).unwrap();
        assert!(local_to_utc(NaiveDateTime::MAX, west).is_none());
        assert!(local_instant(NaiveDate::MAX, 23, 30, west).is_none());
        assert!(local_instant(NaiveDate::MAX, 24, 0, FixedOffset::east_opt(0).unwrap()).is_none());
    }
}
