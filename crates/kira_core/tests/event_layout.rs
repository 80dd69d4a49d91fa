use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use kira_core::{
    calculate_event_layout, current_time_marker, event_block, CalendarEvent, EventBlock,
    EventDraft, EventLayout, WorkingHours,
};

fn event(title: &str, start_minute: i64, end_minute: i64) -> CalendarEvent {
    let base = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
    CalendarEvent::from_draft(EventDraft::new(
        title,
        base + Duration::minutes(start_minute),
        base + Duration::minutes(end_minute),
    ))
}

fn position(layout: &EventLayout, event: &CalendarEvent) -> (f64, f64) {
    let position = layout[&event.id];
    (position.left, position.width)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn no_events_yield_empty_layout() {
    let events: Vec<CalendarEvent> = Vec::new();
    assert!(calculate_event_layout(&events).is_empty());
}

#[test]
fn single_event_spans_full_width() {
    let events = vec![event("Solo", 9 * 60, 10 * 60)];

    let layout = calculate_event_layout(&events);

    assert_eq!(position(&layout, &events[0]), (0.0, 100.0));
    assert_eq!(layout[&events[0].id].css_width(), "100%");
}

#[test]
fn two_overlapping_events_split_in_half() {
    let a = event("A", 9 * 60, 11 * 60);
    let b = event("B", 10 * 60, 12 * 60);
    let events = vec![b.clone(), a.clone()];

    let layout = calculate_event_layout(&events);

    assert_eq!(position(&layout, &a), (0.0, 50.0));
    assert_eq!(position(&layout, &b), (50.0, 50.0));
    assert_eq!(layout[&b.id].css_left(), "50%");
}

#[test]
fn touching_events_each_get_full_width() {
    let a = event("A", 9 * 60, 10 * 60);
    let b = event("B", 10 * 60, 11 * 60);

    let layout = calculate_event_layout(&[a.clone(), b.clone()]);

    assert_eq!(position(&layout, &a), (0.0, 100.0));
    assert_eq!(position(&layout, &b), (0.0, 100.0));
}

#[test]
fn three_mutually_overlapping_events_use_three_lanes() {
    let a = event("A", 9 * 60, 12 * 60);
    let b = event("B", 9 * 60 + 30, 11 * 60);
    let c = event("C", 10 * 60, 10 * 60 + 30);

    let layout = calculate_event_layout(&[c.clone(), a.clone(), b.clone()]);

    for (item, lane) in [(&a, 0.0), (&b, 1.0), (&c, 2.0)] {
        let (left, width) = position(&layout, item);
        assert_close(width, 100.0 / 3.0);
        assert_close(left, lane * 100.0 / 3.0);
    }
}

#[test]
fn tied_starts_put_the_longer_event_first() {
    let short = event("Short", 9 * 60, 9 * 60 + 30);
    let long = event("Long", 9 * 60, 11 * 60);

    let layout = calculate_event_layout(&[short.clone(), long.clone()]);

    assert_eq!(position(&layout, &long), (0.0, 50.0));
    assert_eq!(position(&layout, &short), (50.0, 50.0));
}

#[test]
fn separate_clusters_are_sized_independently() {
    let a = event("A", 9 * 60, 10 * 60);
    let b = event("B", 9 * 60 + 30, 10 * 60 + 30);
    let lunch = event("Lunch", 12 * 60, 13 * 60);

    let layout = calculate_event_layout(&[a.clone(), b.clone(), lunch.clone()]);

    assert_eq!(position(&layout, &a).1, 50.0);
    assert_eq!(position(&layout, &b).1, 50.0);
    assert_eq!(position(&layout, &lunch), (0.0, 100.0));
}

#[test]
fn lane_is_reused_once_it_frees_up() {
    // A spans the cluster; B ends before C starts, so C drops back into B's lane.
    let a = event("A", 9 * 60, 12 * 60);
    let b = event("B", 9 * 60 + 30, 10 * 60);
    let c = event("C", 10 * 60 + 30, 11 * 60);

    let layout = calculate_event_layout(&[a.clone(), b.clone(), c.clone()]);

    assert_eq!(position(&layout, &a), (0.0, 50.0));
    assert_eq!(position(&layout, &b), (50.0, 50.0));
    assert_eq!(position(&layout, &c), (50.0, 50.0));
}

#[test]
fn event_block_measures_minutes_from_first_working_hour() {
    let hours = WorkingHours::default();
    let offset = FixedOffset::east_opt(0).unwrap();
    let deep_work = event("Deep Work", 9 * 60, 11 * 60 + 30);
    let early = event("Early", 5 * 60 + 30, 6 * 60 + 15);

    assert_eq!(
        event_block(&deep_work, &hours, offset),
        EventBlock {
            top: 180,
            height: 150
        }
    );
    assert_eq!(
        event_block(&early, &hours, offset),
        EventBlock { top: -30, height: 45 }
    );
}

#[test]
fn current_time_marker_is_hidden_off_day_and_off_hours() {
    let hours = WorkingHours::new(8, 18);
    let offset = FixedOffset::east_opt(0).unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let at = |hour: u32, minute: u32| -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, hour, minute, 0).unwrap()
    };

    assert_eq!(current_time_marker(at(9, 15), day, &hours, offset), Some(75));
    assert_eq!(current_time_marker(at(18, 30), day, &hours, offset), Some(630));
    assert_eq!(current_time_marker(at(7, 59), day, &hours, offset), None);
    assert_eq!(current_time_marker(at(19, 0), day, &hours, offset), None);
    assert_eq!(
        current_time_marker(at(9, 15), day.succ_opt().unwrap(), &hours, offset),
        None
    );
}

mod properties {
    use super::event;
    use kira_core::calculate_event_layout;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn overlapping_events_never_share_a_column(
            spans in prop::collection::vec((0i64..1_380, 1i64..240), 0..24)
        ) {
            let events: Vec<_> = spans
                .iter()
                .enumerate()
                .map(|(index, (start, length))| event(&format!("e{index}"), *start, start + length))
                .collect();

            let layout = calculate_event_layout(&events);
            prop_assert_eq!(layout.len(), events.len());

            for position in layout.values() {
                prop_assert!(position.width > 0.0 && position.width <= 100.0);
                prop_assert!(position.left >= 0.0 && position.left + position.width <= 100.0 + 1e-9);
            }

            for (i, a) in events.iter().enumerate() {
                for b in events.iter().skip(i + 1) {
                    if a.overlaps(b) {
                        let pa = layout[&a.id];
                        let pb = layout[&b.id];
                        prop_assert_eq!(pa.width, pb.width);
                        prop_assert!((pa.left - pb.left).abs() > 1e-9);
                    }
                }
            }
        }
    }
}
