//! Store port owning task records.

use crate::task::domain::{NewTask, PatientId, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Implementations own `manual_order`: they assign it on creation and swap it
/// between neighbours on moves.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task of a patient ordered by manual position.
    async fn list_by_patient(&self, patient_id: PatientId) -> TaskStoreResult<Vec<Task>>;

    /// Stores a new task at the end of the patient's manual order.
    async fn create(&self, new_task: NewTask) -> TaskStoreResult<Task>;

    /// Replaces the editable fields of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update(&self, task_id: TaskId, patch: TaskPatch) -> TaskStoreResult<Task>;

    /// Flips a task's completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn toggle_completed(&self, task_id: TaskId) -> TaskStoreResult<Task>;

    /// Permanently removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn delete(&self, task_id: TaskId) -> TaskStoreResult<()>;

    /// Swaps the task's manual position with its predecessor.
    ///
    /// Leaves positions untouched when the task is already first.
    async fn move_up(&self, task_id: TaskId) -> TaskStoreResult<Task>;

    /// Swaps the task's manual position with its successor.
    ///
    /// Leaves positions untouched when the task is already last.
    async fn move_down(&self, task_id: TaskId) -> TaskStoreResult<Task>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store did not answer within the configured timeout.
    #[error("task store timed out after {0:?}")]
    TimedOut(Duration),

    /// Persistence-layer or transport failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
