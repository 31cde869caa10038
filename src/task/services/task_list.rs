//! Service layer binding the task list engine to a task store.

use crate::task::{
    domain::{
        CaregiverId, NewTask, PatientId, TaskDomainError, TaskId, TaskPatch, TaskPriority,
        TaskTitle,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
    services::{TaskBoard, TaskListConfig},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    due_at: Option<DateTime<Utc>>,
    priority: TaskPriority,
    caregiver_id: Option<CaregiverId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_at: None,
            priority: TaskPriority::default(),
            caregiver_id: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due timestamp.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Records the caregiver creating the task.
    #[must_use]
    pub const fn with_caregiver(mut self, caregiver_id: CaregiverId) -> Self {
        self.caregiver_id = Some(caregiver_id);
        self
    }

    pub(crate) fn into_new_task(self, patient_id: PatientId) -> Result<NewTask, TaskDomainError> {
        Ok(NewTask {
            patient_id,
            caregiver_id: self.caregiver_id,
            title: TaskTitle::new(self.title)?,
            description: self.description,
            due_at: self.due_at,
            priority: self.priority,
            completed: false,
        })
    }
}

/// Request payload for editing a task.
///
/// Title, description, and due date replace the stored values; priority and
/// completion are only changed when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskRequest {
    title: String,
    description: Option<String>,
    due_at: Option<DateTime<Utc>>,
    priority: Option<TaskPriority>,
    completed: Option<bool>,
}

impl EditTaskRequest {
    /// Creates a request replacing the title and clearing description and
    /// due date.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_at: None,
            priority: None,
            completed: None,
        }
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement due timestamp.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Changes the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Changes the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub(crate) fn into_patch(self) -> Result<TaskPatch, TaskDomainError> {
        Ok(TaskPatch {
            title: TaskTitle::new(self.title)?,
            description: self.description,
            due_at: self.due_at,
            priority: self.priority,
            completed: self.completed,
        })
    }
}

/// Service-level errors for task list operations.
#[derive(Debug, Error)]
pub enum TaskListError {
    /// Local validation failed; the store was not called.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The task is not part of the loaded list.
    #[error("task {0} is not in the current task list")]
    NotFound(TaskId),

    /// Manual reordering has not been switched on.
    #[error("manual reordering is disabled")]
    ReorderDisabled,

    /// An automatic sort is active, so manual positions are not shown.
    #[error("manual reordering is unavailable while an automatic sort is active")]
    AutomaticSortActive,

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for task list service operations.
pub type TaskListResult<T> = Result<T, TaskListError>;

/// Task list engine bound to a store and a clock.
///
/// The service itself is stateless; [`TaskListService::open_board`] loads a
/// patient's tasks into a [`TaskBoard`] that holds the snapshot and view
/// preferences.
pub struct TaskListService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    config: TaskListConfig,
}

impl<S, C> Clone for TaskListService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            config: self.config,
        }
    }
}

impl<S, C> TaskListService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a service with default configuration.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self::with_config(store, clock, TaskListConfig::default())
    }

    /// Creates a service with custom configuration.
    #[must_use]
    pub const fn with_config(store: Arc<S>, clock: Arc<C>, config: TaskListConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &TaskListConfig {
        &self.config
    }

    /// Loads a patient's tasks into a board with default view preferences.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Store`] when the initial load fails.
    pub async fn open_board(&self, patient_id: PatientId) -> TaskListResult<TaskBoard<S, C>> {
        let mut board = TaskBoard::new(self.clone(), patient_id);
        board.reload().await?;
        Ok(board)
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Awaits a store call, bounding it by the configured timeout.
    pub(crate) async fn call<T>(
        &self,
        operation: &'static str,
        future: impl Future<Output = TaskStoreResult<T>>,
    ) -> TaskStoreResult<T> {
        let timeout = self.config.request_timeout;
        match tokio::time::timeout(timeout, future).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                warn!(operation, error = %err, "task store call failed");
                Err(err)
            }
            Err(_) => {
                warn!(operation, ?timeout, "task store call timed out");
                Err(TaskStoreError::TimedOut(timeout))
            }
        }
    }
}
