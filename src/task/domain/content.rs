//! Validated task content and the payloads used to create or edit tasks.

use super::{CaregiverId, PatientId, TaskDomainError, TaskPriority};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-empty, trimmed task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] if the title is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trims a free-text description, mapping blank input to `None`.
pub(crate) fn normalize_description(description: Option<String>) -> Option<String> {
    description.and_then(|value| {
        let normalized = value.trim();
        (!normalized.is_empty()).then(|| normalized.to_owned())
    })
}

/// Fields for a task the store has not yet persisted.
///
/// The store assigns the identifier and appends the task to the end of the
/// patient's manual order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Owning patient.
    pub patient_id: PatientId,
    /// Caregiver creating the task, if known.
    pub caregiver_id: Option<CaregiverId>,
    /// Task title.
    pub title: TaskTitle,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional due timestamp.
    pub due_at: Option<DateTime<Utc>>,
    /// Task priority.
    pub priority: TaskPriority,
    /// Whether the task starts out completed.
    pub completed: bool,
}

impl NewTask {
    /// Creates a pending, medium-priority task with no due date.
    #[must_use]
    pub fn new(patient_id: PatientId, title: TaskTitle) -> Self {
        Self {
            patient_id,
            caregiver_id: None,
            title,
            description: None,
            due_at: None,
            priority: TaskPriority::default(),
            completed: false,
        }
    }
}

/// Replacement values for an edit.
///
/// Title, description, and due date are always replaced. Priority and
/// completion are only changed when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title.
    pub title: TaskTitle,
    /// New description; `None` clears it.
    pub description: Option<String>,
    /// New due timestamp; `None` clears it.
    pub due_at: Option<DateTime<Utc>>,
    /// New priority, if changing.
    pub priority: Option<TaskPriority>,
    /// New completion flag, if changing.
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Creates a patch that replaces the title and clears description and
    /// due date.
    #[must_use]
    pub const fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            due_at: None,
            priority: None,
            completed: None,
        }
    }
}
