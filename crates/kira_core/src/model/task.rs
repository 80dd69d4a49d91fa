//! Task model.
//!
//! # Invariants
//! - Tasks are created in `todo` state.
//! - After creation only `status` changes; title and tag are fixed.

use crate::model::event::EventKind;
pub use crate::model::id::TaskId;
use crate::model::validation::{validate_title, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    Done,
}

impl TaskStatus {
    /// Returns the opposite status.
    pub fn toggled(self) -> Self {
        match self {
            Self::Todo => Self::Done,
            Self::Done => Self::Todo,
        }
    }
}

/// Task data supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub tag: EventKind,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, tag: EventKind) -> Self {
        Self {
            title: title.into(),
            tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub tag: EventKind,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a `todo` task stamped with `created_at`.
    pub fn from_draft(draft: TaskDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::generate(),
            title: draft.title,
            tag: draft.tag,
            status: TaskStatus::Todo,
            created_at,
        }
    }

    pub fn is_todo(&self) -> bool {
        self.status == TaskStatus::Todo
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)
    }
}
