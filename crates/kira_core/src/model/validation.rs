//! Field-level validation errors for schedule records.

use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for a record about to enter the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Event does not end strictly after it starts.
    InvalidEventWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Working-hours bound outside `0..=23`.
    InvalidHour { field: &'static str, value: u8 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::InvalidEventWindow { start, end } => write!(
                f,
                "event end ({}) must be after start ({})",
                end.to_rfc3339(),
                start.to_rfc3339()
            ),
            Self::InvalidHour { field, value } => {
                write!(f, "{field} must be within 0..=23, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}
