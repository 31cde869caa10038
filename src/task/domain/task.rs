//! Task aggregate root and due-date classification.

use super::{
    CaregiverId, NewTask, PatientId, TaskId, TaskPatch, TaskPriority, TaskTitle,
    content::normalize_description,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A patient's to-do item.
///
/// Deserialization goes through [`PersistedTaskData`], so decoded records get
/// the same normalisation as [`Task::from_persisted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PersistedTaskData")]
pub struct Task {
    id: TaskId,
    patient_id: PatientId,
    caregiver_id: Option<CaregiverId>,
    title: TaskTitle,
    description: Option<String>,
    due_at: Option<DateTime<Utc>>,
    priority: TaskPriority,
    completed: bool,
    completed_at: Option<DateTime<Utc>>,
    manual_order: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning patient.
    pub patient_id: PatientId,
    /// Authoring caregiver, if any.
    pub caregiver_id: Option<CaregiverId>,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted due timestamp.
    pub due_at: Option<DateTime<Utc>>,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted completion flag.
    pub completed: bool,
    /// When the task was last marked completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted position in the patient's manual order.
    pub manual_order: i64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// How a task's due date relates to the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DueStatus {
    /// The due day has passed.
    Overdue {
        /// Whole days since the due day.
        days: u64,
    },
    /// The task is due today.
    DueToday,
    /// The task is due on a later day.
    Upcoming {
        /// The due day.
        date: NaiveDate,
    },
}

impl From<PersistedTaskData> for Task {
    fn from(data: PersistedTaskData) -> Self {
        Self::from_persisted(data)
    }
}

impl Task {
    /// Creates a task from creation fields at the given manual position.
    #[must_use]
    pub fn create(new_task: NewTask, manual_order: i64, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let completed_at = new_task.completed.then_some(timestamp);
        Self {
            id: TaskId::new(),
            patient_id: new_task.patient_id,
            caregiver_id: new_task.caregiver_id,
            title: new_task.title,
            description: normalize_description(new_task.description),
            due_at: new_task.due_at,
            priority: new_task.priority,
            completed: new_task.completed,
            completed_at,
            manual_order,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// Blank descriptions become `None`, and `completed_at` is dropped when
    /// the task is pending.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            patient_id: data.patient_id,
            caregiver_id: data.caregiver_id,
            title: data.title,
            description: normalize_description(data.description),
            due_at: data.due_at,
            priority: data.priority,
            completed: data.completed,
            completed_at: data.completed_at.filter(|_| data.completed),
            manual_order: data.manual_order,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning patient.
    #[must_use]
    pub const fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    /// Returns the authoring caregiver, if recorded.
    #[must_use]
    pub const fn caregiver_id(&self) -> Option<CaregiverId> {
        self.caregiver_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due timestamp, if any.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns when the task was completed, if it currently is.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the task's position in the patient's manual order.
    #[must_use]
    pub const fn manual_order(&self) -> i64 {
        self.manual_order
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Classifies the due date against `today`.
    ///
    /// Returns `None` for tasks without a due date. Only the calendar day of
    /// the due timestamp is considered.
    #[must_use]
    pub fn due_status(&self, today: NaiveDate) -> Option<DueStatus> {
        let due_day = self.due_at?.date_naive();
        let status = match due_day.cmp(&today) {
            std::cmp::Ordering::Less => DueStatus::Overdue {
                days: today.signed_duration_since(due_day).num_days().unsigned_abs(),
            },
            std::cmp::Ordering::Equal => DueStatus::DueToday,
            std::cmp::Ordering::Greater => DueStatus::Upcoming { date: due_day },
        };
        Some(status)
    }

    /// Returns whether the task is pending and its due day has passed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed
            && matches!(
                self.due_status(now.date_naive()),
                Some(DueStatus::Overdue { .. })
            )
    }

    /// Replaces the editable fields with the values in `patch`.
    pub fn apply_patch(&mut self, patch: TaskPatch, clock: &impl Clock) {
        self.title = patch.title;
        self.description = normalize_description(patch.description);
        self.due_at = patch.due_at;
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(completed) = patch.completed {
            self.set_completed(completed, clock);
        }
        self.touch(clock);
    }

    /// Flips the completion flag.
    pub fn toggle_completed(&mut self, clock: &impl Clock) {
        self.set_completed(!self.completed, clock);
        self.touch(clock);
    }

    /// Moves the task to a new manual position.
    pub fn set_manual_order(&mut self, manual_order: i64, clock: &impl Clock) {
        if self.manual_order != manual_order {
            self.manual_order = manual_order;
            self.touch(clock);
        }
    }

    fn set_completed(&mut self, completed: bool, clock: &impl Clock) {
        if self.completed == completed {
            return;
        }
        self.completed = completed;
        self.completed_at = completed.then(|| clock.utc());
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
