//! Schedule store service.
//!
//! # Responsibility
//! - Hold the single `ScheduleState` of a session.
//! - Gatekeep the event overlap invariant on every add/update.
//! - Persist the whole state to one durable slot after each mutation.
//!
//! # Invariants
//! - No two stored events overlap under the half-open test, including after load.
//! - An event is never compared against itself during update.
//! - Unknown ids on toggle/remove/delete are no-ops, not errors.
//! - A failed snapshot write never rolls back the in-memory transition.

use crate::config::ScheduleConfig;
use crate::layout::lanes::{calculate_event_layout, EventLayout};
use crate::model::day_pool::{DayPoolItem, DayPoolItemId};
use crate::model::event::{CalendarEvent, EventDraft, EventId};
use crate::model::preferences::{PreferencesPatch, UserPreferences};
use crate::model::state::ScheduleState;
use crate::model::task::{Task, TaskDraft, TaskId};
use crate::model::time::local_day;
use crate::model::validation::ValidationError;
use crate::repo::snapshot_repo::{RepoError, SnapshotRepository};
use crate::service::clock::{Clock, SystemClock};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection of an event whose interval intersects a stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapError {
    /// Id of the stored event that blocks the write.
    pub conflicting_id: EventId,
    pub conflicting_title: String,
    pub conflicting_start: DateTime<Utc>,
    pub conflicting_end: DateTime<Utc>,
}

impl Display for OverlapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "event overlaps \"{}\" ({} - {})",
            self.conflicting_title,
            self.conflicting_start.to_rfc3339(),
            self.conflicting_end.to_rfc3339()
        )
    }
}

impl Error for OverlapError {}

/// Service error for schedule commands.
#[derive(Debug)]
pub enum ScheduleError {
    Validation(ValidationError),
    Overlap(OverlapError),
    EventNotFound(EventId),
    /// State could not be encoded into a snapshot.
    Encode(serde_json::Error),
    Repo(RepoError),
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Overlap(err) => write!(f, "{err}"),
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
            Self::Encode(err) => write!(f, "failed to encode schedule snapshot: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl ScheduleError {
    /// Stable code for log lines; never carries user-entered text.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Overlap(_) => "overlap",
            Self::EventNotFound(_) => "event_not_found",
            Self::Encode(_) => "snapshot_encode_failed",
            Self::Repo(_) => "slot_write_failed",
        }
    }
}

impl Error for ScheduleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Overlap(err) => Some(err),
            Self::EventNotFound(_) => None,
            Self::Encode(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ScheduleError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<OverlapError> for ScheduleError {
    fn from(value: OverlapError) -> Self {
        Self::Overlap(value)
    }
}

impl From<RepoError> for ScheduleError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// How the initial state of a session was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Decoded from an existing snapshot.
    Restored,
    /// Slot was empty; demonstration content was seeded and written.
    Seeded,
    /// Slot was empty and seeding is disabled.
    Empty,
    /// Decoded, but events breaking the store invariants were dropped.
    Repaired,
    /// Slot was unreadable or corrupt; started from defaults.
    Recovered,
}

/// Schedule store facade over a snapshot repository.
pub struct ScheduleService<R: SnapshotRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
    config: ScheduleConfig,
    state: ScheduleState,
    load_outcome: LoadOutcome,
}

impl<R: SnapshotRepository, C: Clock> ScheduleService<R, C> {
    /// Restores the session state from the configured slot.
    ///
    /// Never fails: a corrupt or unreadable snapshot is logged and replaced
    /// by the default state, and an empty slot is seeded (when enabled).
    /// Stored events that break the overlap or window rules are dropped.
    pub fn load(repo: R, clock: C, config: ScheduleConfig) -> Self {
        let (state, load_outcome) = restore_state(&repo, &clock, &config);
        let service = Self {
            repo,
            clock,
            config,
            state,
            load_outcome,
        };
        if load_outcome == LoadOutcome::Seeded {
            service.persist("seed");
        }
        service
    }

    /// Wraps an already materialized state without touching storage.
    pub fn with_state(repo: R, clock: C, config: ScheduleConfig, state: ScheduleState) -> Self {
        Self {
            repo,
            clock,
            config,
            state,
            load_outcome: LoadOutcome::Restored,
        }
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.state.events
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn day_pool(&self) -> &[DayPoolItem] {
        &self.state.day_pool
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.state.preferences
    }

    pub fn event(&self, id: &EventId) -> Option<&CalendarEvent> {
        self.state.events.iter().find(|event| &event.id == id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.state.tasks.iter().find(|task| &task.id == id)
    }

    /// Adds a new event under a generated id.
    ///
    /// # Errors
    /// - `Validation` for a blank title or an empty/reversed window.
    /// - `Overlap` when the window intersects any stored event; state is
    ///   left untouched.
    pub fn add_event(&mut self, draft: EventDraft) -> Result<CalendarEvent, ScheduleError> {
        let event = CalendarEvent::from_draft(draft);
        event.validate()?;
        self.ensure_no_overlap(&event, "event_add")?;

        self.state.events.push(event.clone());
        info!(
            "event=event_add module=schedule status=ok event_id={} kind={}",
            event.id,
            event.kind.as_str()
        );
        self.persist("event_add");
        Ok(event)
    }

    /// Replaces a stored event by id.
    ///
    /// The event's own previous interval is excluded from the overlap check.
    pub fn update_event(&mut self, event: CalendarEvent) -> Result<CalendarEvent, ScheduleError> {
        event.validate()?;
        let index = self
            .state
            .events
            .iter()
            .position(|stored| stored.id == event.id)
            .ok_or_else(|| ScheduleError::EventNotFound(event.id.clone()))?;
        self.ensure_no_overlap(&event, "event_update")?;

        self.state.events[index] = event.clone();
        info!(
            "event=event_update module=schedule status=ok event_id={}",
            event.id
        );
        self.persist("event_update");
        Ok(event)
    }

    /// Removes an event; returns whether anything was removed.
    pub fn delete_event(&mut self, id: &EventId) -> bool {
        let before = self.state.events.len();
        self.state.events.retain(|event| &event.id != id);
        let removed = self.state.events.len() != before;
        if removed {
            info!("event=event_delete module=schedule status=ok event_id={id}");
            self.persist("event_delete");
        } else {
            debug!("event=event_delete module=schedule status=noop event_id={id}");
        }
        removed
    }

    /// Adds a `todo` task stamped with the current time.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Task, ScheduleError> {
        let task = Task::from_draft(draft, self.clock.now());
        task.validate()?;

        self.state.tasks.push(task.clone());
        info!(
            "event=task_add module=schedule status=ok task_id={} tag={}",
            task.id,
            task.tag.as_str()
        );
        self.persist("task_add");
        Ok(task)
    }

    /// Flips `todo <-> done`; `None` when the task does not exist.
    pub fn toggle_task_status(&mut self, id: &TaskId) -> Option<Task> {
        let task = self.state.tasks.iter_mut().find(|task| &task.id == id)?;
        task.status = task.status.toggled();
        let updated = task.clone();

        info!(
            "event=task_toggle module=schedule status=ok task_id={id} task_status={:?}",
            updated.status
        );
        self.persist("task_toggle");
        Some(updated)
    }

    /// Removes a task. Day-pool items pointing at it are left in place.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let before = self.state.tasks.len();
        self.state.tasks.retain(|task| &task.id != id);
        let removed = self.state.tasks.len() != before;
        if removed {
            info!("event=task_delete module=schedule status=ok task_id={id}");
            self.persist("task_delete");
        }
        removed
    }

    /// Pulls a task into the focus list of the day `date` falls on.
    pub fn add_to_day_pool(&mut self, task_id: TaskId, date: DateTime<Utc>) -> DayPoolItem {
        let order = u32::try_from(self.state.day_pool.len()).unwrap_or(u32::MAX);
        let item = DayPoolItem::new(task_id, date, order);

        self.state.day_pool.push(item.clone());
        info!(
            "event=day_pool_add module=schedule status=ok item_id={} task_id={} date={} order={order}",
            item.id,
            item.task_id,
            date.to_rfc3339()
        );
        self.persist("day_pool_add");
        item
    }

    pub fn remove_from_day_pool(&mut self, id: &DayPoolItemId) -> bool {
        let before = self.state.day_pool.len();
        self.state.day_pool.retain(|item| &item.id != id);
        let removed = self.state.day_pool.len() != before;
        if removed {
            info!("event=day_pool_remove module=schedule status=ok item_id={id}");
            self.persist("day_pool_remove");
        }
        removed
    }

    /// Shallow-merges `patch` into the current preferences.
    pub fn update_preferences(
        &mut self,
        patch: PreferencesPatch,
    ) -> Result<UserPreferences, ScheduleError> {
        let merged = self.state.preferences.merged(&patch);
        merged.validate()?;

        self.state.preferences = merged;
        info!(
            "event=preferences_update module=schedule status=ok working_hours={}-{}",
            merged.working_hours.start, merged.working_hours.end
        );
        self.persist("preferences_update");
        Ok(merged)
    }

    /// Events starting on `day` (display offset), sorted by start.
    pub fn events_on(&self, day: NaiveDate) -> Vec<&CalendarEvent> {
        let offset = self.config.display_offset;
        let mut events: Vec<&CalendarEvent> = self
            .state
            .events
            .iter()
            .filter(|event| local_day(event.start, offset) == day)
            .collect();
        events.sort_by_key(|event| event.start);
        events
    }

    /// Lane geometry for the events of `day`.
    pub fn day_layout(&self, day: NaiveDate) -> EventLayout {
        calculate_event_layout(self.events_on(day))
    }

    /// Tasks pulled into `day` (display offset), in pool order. Orphaned
    /// items are skipped.
    pub fn day_tasks_on(&self, day: NaiveDate) -> Vec<&Task> {
        let offset = self.config.display_offset;
        let mut items: Vec<&DayPoolItem> = self
            .state
            .day_pool
            .iter()
            .filter(|item| item.is_on(day, offset))
            .collect();
        items.sort_by_key(|item| item.order);
        items
            .into_iter()
            .filter_map(|item| self.task(&item.task_id))
            .collect()
    }

    /// Open tasks not pulled into any day.
    pub fn inbox_tasks(&self) -> Vec<&Task> {
        let scheduled: HashSet<&str> = self
            .state
            .day_pool
            .iter()
            .map(|item| item.task_id.as_str())
            .collect();
        self.state
            .tasks
            .iter()
            .filter(|task| task.is_todo() && !scheduled.contains(task.id.as_str()))
            .collect()
    }

    /// Writes the current state to the durable slot.
    pub fn save(&self) -> Result<(), ScheduleError> {
        let snapshot = self.state.to_snapshot().map_err(ScheduleError::Encode)?;
        self.repo
            .write_snapshot(&self.config.storage_key, &snapshot)?;
        Ok(())
    }

    fn persist(&self, trigger: &str) {
        if let Err(err) = self.save() {
            error!(
                "event=schedule_save module=schedule status=error trigger={trigger} error_code={}",
                err.code()
            );
        }
    }

    fn ensure_no_overlap(&self, candidate: &CalendarEvent, action: &str) -> Result<(), OverlapError> {
        let conflict = self
            .state
            .events
            .iter()
            .filter(|stored| stored.id != candidate.id)
            .find(|stored| candidate.overlaps(stored));

        match conflict {
            Some(stored) => {
                warn!(
                    "event={action} module=schedule status=rejected reason=overlap event_id={} conflicting_id={}",
                    candidate.id, stored.id
                );
                Err(OverlapError {
                    conflicting_id: stored.id.clone(),
                    conflicting_title: stored.title.clone(),
                    conflicting_start: stored.start,
                    conflicting_end: stored.end,
                })
            }
            None => Ok(()),
        }
    }
}

fn restore_state<R: SnapshotRepository, C: Clock>(
    repo: &R,
    clock: &C,
    config: &ScheduleConfig,
) -> (ScheduleState, LoadOutcome) {
    let raw = match repo.read_snapshot(&config.storage_key) {
        Ok(raw) => raw,
        Err(err) => {
            error!(
                "event=schedule_load module=schedule status=error error_code=slot_read_failed error={err}"
            );
            return (ScheduleState::default(), LoadOutcome::Recovered);
        }
    };

    let Some(raw) = raw else {
        if !config.seed_demo {
            info!("event=schedule_load module=schedule status=ok source=empty");
            return (ScheduleState::default(), LoadOutcome::Empty);
        }
        let now = clock.now();
        let today = local_day(now, config.display_offset);
        info!("event=schedule_load module=schedule status=ok source=seed day={today}");
        return (
            ScheduleState::demo(today, config.display_offset, now),
            LoadOutcome::Seeded,
        );
    };

    match ScheduleState::from_snapshot(&raw) {
        Ok(mut state) => {
            let dropped = state.retain_consistent_events();
            if !dropped.is_empty() {
                let ids: Vec<&str> = dropped.iter().map(|event| event.id.as_str()).collect();
                warn!(
                    "event=schedule_load module=schedule status=repaired reason=inconsistent_events dropped={} event_ids={}",
                    dropped.len(),
                    ids.join(",")
                );
            }
            info!(
                "event=schedule_load module=schedule status=ok source=snapshot events={} tasks={} day_pool={}",
                state.events.len(),
                state.tasks.len(),
                state.day_pool.len()
            );
            let outcome = if dropped.is_empty() {
                LoadOutcome::Restored
            } else {
                LoadOutcome::Repaired
            };
            (state, outcome)
        }
        Err(err) => {
            error!(
                "event=schedule_load module=schedule status=error error_code=snapshot_parse_failed category={:?} line={} column={}",
                err.classify(),
                err.line(),
                err.column()
            );
            (ScheduleState::default(), LoadOutcome::Recovered)
        }
    }
}
