//! Tool-call decoding and execution.
//!
//! Supported tools and their JSON arguments:
//! - `addEvent`: `{title, start, end, description?}`
//! - `addTask`: `{title, tag?}` (tag defaults to `work`)
//! - `updateEvent`: `{id, updates: {title?, start?, end?}}`
//! - `deleteEvent`: `{id}`
//!
//! Instants are ISO-8601 strings. Strings with an offset (`Z`, `+02:00`) are
//! taken as-is; offset-less local times are read in the display offset.

use crate::model::event::{EventDraft, EventId, EventKind};
use crate::model::task::TaskDraft;
use crate::model::time::local_to_utc;
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::service::clock::Clock;
use crate::service::schedule_service::{ScheduleError, ScheduleService};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TOOL_ADD_EVENT: &str = "addEvent";
pub const TOOL_ADD_TASK: &str = "addTask";
pub const TOOL_UPDATE_EVENT: &str = "updateEvent";
pub const TOOL_DELETE_EVENT: &str = "deleteEvent";

const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Error returned to the agent layer.
#[derive(Debug)]
pub enum ToolCallError {
    /// Tool name is not part of the supported set.
    UnknownTool(String),
    /// Arguments are not a JSON object of the expected shape.
    MalformedArguments(serde_json::Error),
    /// A field is missing or unparseable; the agent may retry with a fix.
    InvalidArgument { field: &'static str, reason: String },
    /// Arguments were valid but the store refused the command.
    Rejected(ScheduleError),
}

impl Display for ToolCallError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTool(name) => write!(f, "unknown tool `{name}`"),
            Self::MalformedArguments(err) => write!(f, "malformed tool arguments: {err}"),
            Self::InvalidArgument { field, reason } => {
                write!(f, "invalid argument `{field}`: {reason}")
            }
            Self::Rejected(err) => write!(f, "{err}"),
        }
    }
}

impl ToolCallError {
    /// Stable code for log lines; never carries argument text.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::MalformedArguments(_) => "malformed_arguments",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::Rejected(err) => err.code(),
        }
    }
}

impl Error for ToolCallError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedArguments(err) => Some(err),
            Self::Rejected(err) => Some(err),
            Self::UnknownTool(_) | Self::InvalidArgument { .. } => None,
        }
    }
}

impl From<ScheduleError> for ToolCallError {
    fn from(value: ScheduleError) -> Self {
        Self::Rejected(value)
    }
}

/// Field changes requested by `updateEvent`; `None` keeps the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventUpdates {
    pub title: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Decoded tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    AddEvent(EventDraft),
    AddTask(TaskDraft),
    UpdateEvent { id: EventId, updates: EventUpdates },
    DeleteEvent { id: EventId },
}

/// Result handed back to the model as the tool output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Id of the created/affected record.
    pub record_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct AddEventArgs {
    title: Option<String>,
    start: Option<String>,
    end: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AddTaskArgs {
    title: Option<String>,
    tag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateEventArgs {
    id: Option<String>,
    #[serde(default)]
    updates: UpdateFields,
}

#[derive(Debug, Default, Deserialize)]
struct UpdateFields {
    title: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeleteEventArgs {
    id: Option<String>,
}

impl ToolCall {
    /// Decodes tool `name` with raw JSON `args`.
    ///
    /// `offset` resolves local times written without an explicit offset.
    pub fn parse(name: &str, args: &str, offset: FixedOffset) -> Result<Self, ToolCallError> {
        match name {
            TOOL_ADD_EVENT => {
                let args: AddEventArgs = decode(args)?;
                let title = required_text("title", args.title)?;
                let start = parse_instant("start", &required_text("start", args.start)?, offset)?;
                let end = parse_instant("end", &required_text("end", args.end)?, offset)?;
                let mut draft = EventDraft::new(title, start, end).with_kind(EventKind::Work);
                draft.description = args
                    .description
                    .map(|value| value.trim().to_string())
                    .filter(|value| !value.is_empty());
                Ok(Self::AddEvent(draft))
            }
            TOOL_ADD_TASK => {
                let args: AddTaskArgs = decode(args)?;
                let title = required_text("title", args.title)?;
                let tag = match args.tag {
                    Some(tag) => EventKind::parse(&tag).ok_or_else(|| {
                        ToolCallError::InvalidArgument {
                            field: "tag",
                            reason: format!("unsupported tag `{tag}`"),
                        }
                    })?,
                    None => EventKind::Work,
                };
                Ok(Self::AddTask(TaskDraft::new(title, tag)))
            }
            TOOL_UPDATE_EVENT => {
                let args: UpdateEventArgs = decode(args)?;
                let id = EventId::from(required_text("id", args.id)?);
                let updates = EventUpdates {
                    title: args
                        .updates
                        .title
                        .map(|title| required_text("updates.title", Some(title)))
                        .transpose()?,
                    start: args
                        .updates
                        .start
                        .map(|value| parse_instant("updates.start", &value, offset))
                        .transpose()?,
                    end: args
                        .updates
                        .end
                        .map(|value| parse_instant("updates.end", &value, offset))
                        .transpose()?,
                };
                Ok(Self::UpdateEvent { id, updates })
            }
            TOOL_DELETE_EVENT => {
                let args: DeleteEventArgs = decode(args)?;
                let id = EventId::from(required_text("id", args.id)?);
                Ok(Self::DeleteEvent { id })
            }
            other => Err(ToolCallError::UnknownTool(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AddEvent(_) => TOOL_ADD_EVENT,
            Self::AddTask(_) => TOOL_ADD_TASK,
            Self::UpdateEvent { .. } => TOOL_UPDATE_EVENT,
            Self::DeleteEvent { .. } => TOOL_DELETE_EVENT,
        }
    }

    /// Applies the call through the store's public commands.
    pub fn execute<R, C>(self, service: &mut ScheduleService<R, C>) -> Result<ToolOutput, ToolCallError>
    where
        R: SnapshotRepository,
        C: Clock,
    {
        let offset = service.config().display_offset;
        match self {
            Self::AddEvent(draft) => {
                let event = service.add_event(draft)?;
                Ok(ToolOutput {
                    record_id: Some(event.id.to_string()),
                    message: format!(
                        "Event \"{}\" scheduled for {}",
                        event.title,
                        event.start.with_timezone(&offset).format("%H:%M")
                    ),
                })
            }
            Self::AddTask(draft) => {
                let task = service.add_task(draft)?;
                Ok(ToolOutput {
                    record_id: Some(task.id.to_string()),
                    message: format!("Task \"{}\" added successfully", task.title),
                })
            }
            Self::UpdateEvent { id, updates } => {
                let mut event = service
                    .event(&id)
                    .cloned()
                    .ok_or(ScheduleError::EventNotFound(id))?;
                if let Some(title) = updates.title {
                    event.title = title;
                }
                if let Some(start) = updates.start {
                    event.start = start;
                }
                if let Some(end) = updates.end {
                    event.end = end;
                }
                let event = service.update_event(event)?;
                Ok(ToolOutput {
                    record_id: Some(event.id.to_string()),
                    message: format!("Event \"{}\" updated", event.title),
                })
            }
            Self::DeleteEvent { id } => {
                let message = if service.delete_event(&id) {
                    format!("Event {id} deleted")
                } else {
                    format!("Event {id} was not found")
                };
                Ok(ToolOutput {
                    record_id: Some(id.to_string()),
                    message,
                })
            }
        }
    }
}

/// Decodes and executes one tool call, logging the outcome.
pub fn dispatch<R, C>(
    service: &mut ScheduleService<R, C>,
    name: &str,
    args: &str,
) -> Result<ToolOutput, ToolCallError>
where
    R: SnapshotRepository,
    C: Clock,
{
    let offset = service.config().display_offset;
    let result = ToolCall::parse(name, args, offset).and_then(|call| call.execute(service));
    match &result {
        Ok(output) => info!(
            "event=tool_call module=agent status=ok tool={name} record_id={}",
            output.record_id.as_deref().unwrap_or("none")
        ),
        Err(ToolCallError::Rejected(ScheduleError::Overlap(overlap))) => warn!(
            "event=tool_call module=agent status=rejected tool={name} error_code=overlap conflicting_id={}",
            overlap.conflicting_id
        ),
        Err(err @ ToolCallError::Rejected(_)) => warn!(
            "event=tool_call module=agent status=rejected tool={name} error_code={}",
            err.code()
        ),
        Err(ToolCallError::InvalidArgument { field, .. }) => warn!(
            "event=tool_call module=agent status=invalid tool={name} error_code=invalid_argument field={field}"
        ),
        Err(err) => warn!(
            "event=tool_call module=agent status=invalid tool={name} error_code={}",
            err.code()
        ),
    }
    result
}

fn decode<T: DeserializeOwned>(args: &str) -> Result<T, ToolCallError> {
    serde_json::from_str(args).map_err(ToolCallError::MalformedArguments)
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, ToolCallError> {
    let value = value.ok_or_else(|| ToolCallError::InvalidArgument {
        field,
        reason: "is required".to_string(),
    })?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolCallError::InvalidArgument {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn parse_instant(
    field: &'static str,
    value: &str,
    offset: FixedOffset,
) -> Result<DateTime<Utc>, ToolCallError> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }
    let local = LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| ToolCallError::InvalidArgument {
            field,
            reason: format!("`{value}` is not an ISO-8601 date-time"),
        })?;
    local_to_utc(local, offset).ok_or_else(|| ToolCallError::InvalidArgument {
        field,
        reason: format!("`{value}` is outside the supported date range"),
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_instant, ToolCallError};
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn parse_instant_accepts_offsets_and_local_times() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let expected = Utc.with_ymd_and_hms(2026, 10, 18, 7, 0, 0).unwrap();

        assert_eq!(parse_instant("start", "2026-10-18T07:00:00Z", offset).unwrap(), expected);
        assert_eq!(
            parse_instant("start", "2026-10-18T09:00:00+02:00", offset).unwrap(),
            expected
        );
        assert_eq!(parse_instant("start", "2026-10-18T09:00", offset).unwrap(), expected);
        assert_eq!(
            parse_instant("start", " 2026-10-18T09:00:00.000 ", offset).unwrap(),
            expected
        );
    }

    #[test]
    fn parse_instant_rejects_garbage() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let err = parse_instant("end", "tomorrow morning", offset).unwrap_err();
        assert!(err.to_string().contains("`end`"));
    }

    #[test]
    fn parse_instant_rejects_local_times_past_the_calendar_end() {
        let offset = FixedOffset::west_opt(3600).unwrap();
        let err = parse_instant("start", "+262142-12-31T23:30", offset).unwrap_err();
        assert!(matches!(err, ToolCallError::InvalidArgument { field: "start", .. }));
    }

    #[test]
    fn error_codes_do_not_carry_titles() {
        let err = ToolCallError::InvalidArgument {
            field: "title",
            reason: "Secret dentist visit".to_string(),
        };
        assert_eq!(err.code(), "invalid_argument");
        assert_eq!(ToolCallError::UnknownTool("x".to_string()).code(), "unknown_tool");
    }
}
