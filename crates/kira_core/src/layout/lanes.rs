//! Cluster + lane packing for one visible day.
//!
//! Events are sorted by start (longer first on ties), grouped into clusters
//! of transitively overlapping events, and placed first-fit into lanes. Each
//! cluster splits the full width evenly between its own lanes, independent
//! of how busy other clusters of the same day are.

use crate::model::event::{CalendarEvent, EventId};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Horizontal placement of one event, in percent of the column width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventPosition {
    pub left: f64,
    pub width: f64,
}

impl EventPosition {
    pub fn css_left(&self) -> String {
        format!("{}%", self.left)
    }

    pub fn css_width(&self) -> String {
        format!("{}%", self.width)
    }
}

pub type EventLayout = HashMap<EventId, EventPosition>;

/// Computes lane geometry for events already filtered to one day.
///
/// Accepts anything yielding event references (`&[CalendarEvent]`,
/// `Vec<&CalendarEvent>`, ...). Returns an empty layout for no events.
pub fn calculate_event_layout<'a, I>(events: I) -> EventLayout
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    let mut sorted: Vec<&CalendarEvent> = events.into_iter().collect();
    let mut layout = EventLayout::with_capacity(sorted.len());

    sorted.sort_by_key(|event| (event.start, Reverse(event.duration())));

    for cluster in clusters(&sorted) {
        let lanes = assign_lanes(cluster);
        let lane_count = lanes.iter().copied().max().map_or(1, |max| max + 1);
        let width = 100.0 / lane_count as f64;

        for (event, lane) in cluster.iter().zip(lanes) {
            layout.insert(
                event.id.clone(),
                EventPosition {
                    left: lane as f64 * width,
                    width,
                },
            );
        }
    }

    layout
}

/// Splits start-sorted events into maximal runs where each event starts
/// strictly before the running maximum end of the run.
fn clusters<'a, 'e>(sorted: &'a [&'e CalendarEvent]) -> Vec<&'a [&'e CalendarEvent]> {
    let mut result = Vec::new();
    let mut cluster_start = 0;
    let mut cluster_end: Option<DateTime<Utc>> = None;

    for (index, event) in sorted.iter().enumerate() {
        match cluster_end {
            Some(end) if event.start < end => {
                cluster_end = Some(end.max(event.end));
            }
            Some(_) => {
                result.push(&sorted[cluster_start..index]);
                cluster_start = index;
                cluster_end = Some(event.end);
            }
            None => cluster_end = Some(event.end),
        }
    }
    if cluster_start < sorted.len() {
        result.push(&sorted[cluster_start..]);
    }

    result
}

/// First-fit lane index per event, in cluster order.
///
/// A lane accepts an event only when no member overlaps it; every member is
/// checked, not just the last one placed.
fn assign_lanes(cluster: &[&CalendarEvent]) -> Vec<usize> {
    let mut lanes: Vec<Vec<&CalendarEvent>> = Vec::new();
    let mut assigned = Vec::with_capacity(cluster.len());

    for &event in cluster {
        let free = lanes
            .iter()
            .position(|lane| lane.iter().all(|other| !event.overlaps(other)));
        let index = match free {
            Some(index) => {
                lanes[index].push(event);
                index
            }
            None => {
                lanes.push(vec![event]);
                lanes.len() - 1
            }
        };
        assigned.push(index);
    }

    assigned
}

#[cfg(test)]
mod tests {
    use super::{assign_lanes, clusters};
    use crate::model::event::{CalendarEvent, EventDraft};
    use chrono::{TimeZone, Utc};

    fn event(start_min: i64, end_min: i64) -> CalendarEvent {
        let base = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
        CalendarEvent::from_draft(EventDraft::new(
            "slot",
            base + chrono::Duration::minutes(start_min),
            base + chrono::Duration::minutes(end_min),
        ))
    }

    #[test]
    fn touching_events_form_separate_clusters() {
        let a = event(0, 60);
        let b = event(60, 120);
        let sorted = vec![&a, &b];
        assert_eq!(clusters(&sorted).len(), 2);
    }

    #[test]
    fn chained_overlaps_share_one_cluster() {
        let a = event(0, 60);
        let b = event(30, 90);
        let c = event(80, 150);
        let sorted = vec![&a, &b, &c];
        let result = clusters(&sorted);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 3);
    }

    #[test]
    fn event_reuses_first_lane_it_fits() {
        // `mid` collides with `long` in lane 0 but fits after `early` in lane 1.
        let long = event(0, 240);
        let early = event(0, 30);
        let mid = event(40, 60);
        let cluster = vec![&long, &early, &mid];
        assert_eq!(assign_lanes(&cluster), vec![0, 1, 1]);
    }
}
