//! Calendar event model.
//!
//! # Responsibility
//! - Define the canonical event record and its creation draft.
//! - Provide the half-open interval overlap test used by both the store and
//!   the layout engine.
//!
//! # Invariants
//! - `id` is stable and never reused for another event.
//! - A stored event ends strictly after it starts.
//! - `kind` drives display only, never scheduling.

pub use crate::model::id::EventId;
use crate::model::validation::{validate_title, ValidationError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Closed category set shared by events (`type`) and tasks (`tag`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    #[default]
    Work,
    Personal,
    Urgent,
    Wellness,
    Study,
    Social,
    Other,
}

/// Colour family a category is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    Indigo,
    Emerald,
    Orange,
    Rose,
    Teal,
    Pink,
    Blue,
}

impl Palette {
    pub fn name(self) -> &'static str {
        match self {
            Self::Indigo => "indigo",
            Self::Emerald => "emerald",
            Self::Orange => "orange",
            Self::Rose => "rose",
            Self::Teal => "teal",
            Self::Pink => "pink",
            Self::Blue => "blue",
        }
    }
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        Self::Work,
        Self::Personal,
        Self::Urgent,
        Self::Wellness,
        Self::Study,
        Self::Social,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Urgent => "urgent",
            Self::Wellness => "wellness",
            Self::Study => "study",
            Self::Social => "social",
            Self::Other => "other",
        }
    }

    /// Parses the wire name of a category (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "work" => Some(Self::Work),
            "personal" => Some(Self::Personal),
            "urgent" => Some(Self::Urgent),
            "wellness" => Some(Self::Wellness),
            "study" => Some(Self::Study),
            "social" => Some(Self::Social),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Work => Palette::Indigo,
            Self::Personal => Palette::Emerald,
            Self::Urgent => Palette::Orange,
            Self::Wellness => Palette::Rose,
            Self::Study => Palette::Teal,
            Self::Social => Palette::Pink,
            Self::Other => Palette::Blue,
        }
    }
}

/// Event data supplied by a caller before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: EventKind,
    pub description: Option<String>,
}

impl EventDraft {
    /// Creates a `work` draft without description.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            kind: EventKind::default(),
            description: None,
        }
    }

    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Canonical calendar event record.
///
/// Serialized with camelCase keys and the category under `type`; instants
/// are RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarEvent {
    /// Materializes a draft under a freshly generated id.
    pub fn from_draft(draft: EventDraft) -> Self {
        Self::with_id(EventId::generate(), draft)
    }

    /// Materializes a draft under a caller-provided id.
    pub fn with_id(id: EventId, draft: EventDraft) -> Self {
        Self {
            id,
            title: draft.title,
            start: draft.start,
            end: draft.end,
            kind: draft.kind,
            description: draft.description,
        }
    }

    /// Half-open interval intersection: touching boundaries do not overlap.
    pub fn overlaps(&self, other: &CalendarEvent) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        if self.end <= self.start {
            return Err(ValidationError::InvalidEventWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}
