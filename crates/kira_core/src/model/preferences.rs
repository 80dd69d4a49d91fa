//! User preferences.
//!
//! Working hours govern the visible time-slot range only; they never
//! constrain when events may be created.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORKING_HOURS_START: u8 = 6;
pub const DEFAULT_WORKING_HOURS_END: u8 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: u8,
    pub end: u8,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: DEFAULT_WORKING_HOURS_START,
            end: DEFAULT_WORKING_HOURS_END,
        }
    }
}

impl WorkingHours {
    pub fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }

    /// Hour rows shown by the day view, `start..=end`.
    ///
    /// Empty when `start > end`; the ordering itself is not validated.
    pub fn time_slots(&self) -> Vec<u8> {
        (self.start..=self.end).collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start > 23 {
            return Err(ValidationError::InvalidHour {
                field: "workingHours.start",
                value: self.start,
            });
        }
        if self.end > 23 {
            return Err(ValidationError::InvalidHour {
                field: "workingHours.end",
                value: self.end,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub working_hours: WorkingHours,
}

/// Partial preferences update; `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreferencesPatch {
    pub working_hours: Option<WorkingHours>,
}

impl UserPreferences {
    /// Shallow merge: every field present in `patch` replaces the current one.
    pub fn merged(&self, patch: &PreferencesPatch) -> Self {
        Self {
            working_hours: patch.working_hours.unwrap_or(self.working_hours),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.working_hours.validate()
    }
}
