use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use kira_core::{
    CalendarEvent, DayPoolItem, EventDraft, EventKind, Palette, ScheduleState, Task, TaskDraft,
    TaskStatus, WorkingHours,
};
use serde_json::{json, Value};

fn sample_state() -> ScheduleState {
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let mut state = ScheduleState::demo(day, FixedOffset::east_opt(0).unwrap(), now);
    state.events.push(CalendarEvent::from_draft(
        EventDraft::new(
            "Dentist",
            Utc.with_ymd_and_hms(2026, 10, 18, 17, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 18, 17, 45, 0).unwrap(),
        )
        .with_kind(EventKind::Wellness)
        .with_description("Bring the referral"),
    ));
    let task_id = state.tasks[0].id.clone();
    let pooled_at = Utc.with_ymd_and_hms(2026, 10, 18, 7, 0, 0).unwrap();
    state.day_pool.push(DayPoolItem::new(task_id, pooled_at, 0));
    state.preferences.working_hours = WorkingHours::new(7, 20);
    state
}

#[test]
fn snapshot_uses_camel_case_wire_keys() {
    let state = sample_state();
    let value: Value = serde_json::from_str(&state.to_snapshot().unwrap()).unwrap();

    assert_eq!(value["preferences"]["workingHours"], json!({"start": 7, "end": 20}));
    assert_eq!(value["dayPool"][0]["date"], json!("2026-10-18T07:00:00Z"));
    assert_eq!(value["dayPool"][0]["order"], json!(0));
    assert!(value["dayPool"][0]["taskId"].is_string());
    assert_eq!(value["tasks"][0]["status"], json!("todo"));
    assert_eq!(value["tasks"][0]["tag"], json!("work"));
    assert!(value["tasks"][0]["createdAt"].is_string());

    let dentist = &value["events"][2];
    assert_eq!(dentist["type"], json!("wellness"));
    assert_eq!(dentist["description"], json!("Bring the referral"));
    assert_eq!(dentist["start"], json!("2026-10-18T17:00:00Z"));
    assert!(value["events"][0].get("description").is_none());
}

#[test]
fn snapshot_decodes_back_to_the_same_state() {
    let state = sample_state();

    let restored = ScheduleState::from_snapshot(&state.to_snapshot().unwrap()).unwrap();

    assert_eq!(restored, state);
}

#[test]
fn snapshot_without_day_pool_or_preferences_uses_defaults() {
    let raw = json!({
        "events": [{
            "id": "7d1b5a4e-3c59-4c61-9d43-0a4f7cf7e0b1",
            "title": "Gym",
            "start": "2026-10-18T18:00:00+02:00",
            "end": "2026-10-18T19:00:00+02:00",
            "type": "wellness"
        }],
        "tasks": [{
            "id": "0b1e8f0c-2f6e-4b85-8a53-54b0a52f8d10",
            "title": "Pay rent",
            "tag": "personal",
            "status": "done",
            "createdAt": "2026-10-01T09:30:00.000Z"
        }]
    })
    .to_string();

    let state = ScheduleState::from_snapshot(&raw).unwrap();

    assert!(state.day_pool.is_empty());
    assert_eq!(state.preferences.working_hours, WorkingHours::default());
    assert_eq!(
        state.events[0].start,
        Utc.with_ymd_and_hms(2026, 10, 18, 16, 0, 0).unwrap()
    );
    assert_eq!(state.events[0].kind.palette(), Palette::Rose);
    assert_eq!(state.tasks[0].status, TaskStatus::Done);
}

#[test]
fn unknown_category_fails_to_decode() {
    let raw = json!({
        "events": [],
        "tasks": [{
            "id": "0b1e8f0c-2f6e-4b85-8a53-54b0a52f8d10",
            "title": "Mystery",
            "tag": "chores",
            "status": "todo",
            "createdAt": "2026-10-01T09:30:00Z"
        }]
    })
    .to_string();

    assert!(ScheduleState::from_snapshot(&raw).is_err());
}

#[test]
fn every_category_maps_to_a_distinct_palette() {
    let palettes: std::collections::HashSet<Palette> =
        EventKind::ALL.iter().map(|kind| kind.palette()).collect();
    assert_eq!(palettes.len(), EventKind::ALL.len());
    assert_eq!(EventKind::Urgent.palette().name(), "orange");
    assert_eq!(EventKind::parse(" Social "), Some(EventKind::Social));
    assert_eq!(EventKind::parse("chores"), None);

    let task = Task::from_draft(
        TaskDraft::new("Stretch", EventKind::Wellness),
        Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap(),
    );
    assert!(task.is_todo());
}
