//! Per-patient task snapshot and the mutations that refresh it.

use crate::task::{
    domain::{MoveDirection, PatientId, Task, TaskId, ViewPreferences, manual_neighbour, project},
    ports::TaskStore,
    services::{CreateTaskRequest, EditTaskRequest, TaskListError, TaskListResult, TaskListService},
};
use mockable::Clock;
use serde::Serialize;
use tracing::{debug, info};

/// Task counts for a patient's board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    /// Every loaded task.
    pub total: usize,
    /// Completed tasks.
    pub completed: usize,
    /// Pending tasks.
    pub pending: usize,
    /// Pending tasks whose due day has passed.
    pub overdue: usize,
}

/// One patient's loaded tasks plus the view preferences applied to them.
///
/// Every mutation goes to the store, then reloads the patient's tasks and
/// returns the refreshed projection. A failed operation leaves the snapshot
/// untouched. Mutations take `&mut self`, so operations against one board
/// never interleave.
pub struct TaskBoard<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    service: TaskListService<S, C>,
    patient_id: PatientId,
    tasks: Vec<Task>,
    preferences: ViewPreferences,
}

impl<S, C> TaskBoard<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    pub(crate) fn new(service: TaskListService<S, C>, patient_id: PatientId) -> Self {
        Self {
            service,
            patient_id,
            tasks: Vec::new(),
            preferences: ViewPreferences::default(),
        }
    }

    /// Returns the patient this board belongs to.
    #[must_use]
    pub const fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    /// Returns the loaded tasks in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the current view preferences.
    #[must_use]
    pub const fn preferences(&self) -> &ViewPreferences {
        &self.preferences
    }

    /// Replaces the view preferences and returns the new projection.
    pub fn set_preferences(&mut self, preferences: ViewPreferences) -> Vec<&Task> {
        self.preferences = preferences;
        self.view()
    }

    /// Returns the loaded tasks in display order.
    #[must_use]
    pub fn view(&self) -> Vec<&Task> {
        let visible = project(&self.tasks, &self.preferences);
        debug!(
            patient_id = %self.patient_id,
            loaded = self.tasks.len(),
            visible = visible.len(),
            "projected task list"
        );
        visible
    }

    /// Counts loaded tasks by state, using the service clock for overdue
    /// checks.
    #[must_use]
    pub fn summary(&self) -> TaskSummary {
        let now = self.service.now();
        self.tasks
            .iter()
            .fold(TaskSummary::default(), |mut summary, task| {
                summary.total += 1;
                if task.is_completed() {
                    summary.completed += 1;
                } else {
                    summary.pending += 1;
                }
                if task.is_overdue(now) {
                    summary.overdue += 1;
                }
                summary
            })
    }

    /// Reloads the patient's tasks from the store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Store`] when the store call fails.
    pub async fn reload(&mut self) -> TaskListResult<Vec<Task>> {
        let patient_id = self.patient_id;
        let service = &self.service;
        let mut tasks = service
            .call("list_by_patient", service.store().list_by_patient(patient_id))
            .await?;
        tasks.retain(|task| task.patient_id() == patient_id);
        debug!(%patient_id, count = tasks.len(), "reloaded tasks");
        self.tasks = tasks;
        Ok(self.owned_view())
    }

    /// Creates a task at the end of the manual order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Validation`] for a blank title without calling
    /// the store, or [`TaskListError::Store`] when the store rejects the call.
    pub async fn create(&mut self, request: CreateTaskRequest) -> TaskListResult<Vec<Task>> {
        let new_task = request.into_new_task(self.patient_id)?;
        let service = &self.service;
        let created = service
            .call("create", service.store().create(new_task))
            .await?;
        info!(patient_id = %self.patient_id, task_id = %created.id(), "created task");
        self.reload().await
    }

    /// Edits a loaded task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::Validation`] for a blank title,
    /// [`TaskListError::NotFound`] when the task is not loaded, or
    /// [`TaskListError::Store`] when the store rejects the call.
    pub async fn edit(
        &mut self,
        task_id: TaskId,
        request: EditTaskRequest,
    ) -> TaskListResult<Vec<Task>> {
        let patch = request.into_patch()?;
        self.ensure_loaded(task_id)?;
        let service = &self.service;
        service
            .call("update", service.store().update(task_id, patch))
            .await?;
        info!(patient_id = %self.patient_id, %task_id, "edited task");
        self.reload().await
    }

    /// Flips a loaded task's completion flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::NotFound`] when the task is not loaded or
    /// [`TaskListError::Store`] when the store rejects the call.
    pub async fn toggle_completed(&mut self, task_id: TaskId) -> TaskListResult<Vec<Task>> {
        self.ensure_loaded(task_id)?;
        let service = &self.service;
        let updated = service
            .call("toggle_completed", service.store().toggle_completed(task_id))
            .await?;
        info!(
            patient_id = %self.patient_id,
            %task_id,
            completed = updated.is_completed(),
            "toggled task completion"
        );
        self.reload().await
    }

    /// Permanently deletes a loaded task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::NotFound`] when the task is not loaded or
    /// [`TaskListError::Store`] when the store rejects the call.
    pub async fn delete(&mut self, task_id: TaskId) -> TaskListResult<Vec<Task>> {
        self.ensure_loaded(task_id)?;
        let service = &self.service;
        service
            .call("delete", service.store().delete(task_id))
            .await?;
        info!(patient_id = %self.patient_id, %task_id, "deleted task");
        self.reload().await
    }

    /// Swaps a task with its predecessor in the manual order.
    ///
    /// A task already first is left in place without calling the store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::NotFound`] when the task is not loaded,
    /// [`TaskListError::ReorderDisabled`] or
    /// [`TaskListError::AutomaticSortActive`] when the preferences do not allow
    /// manual reordering, or [`TaskListError::Store`] when the store rejects
    /// the call.
    pub async fn move_up(&mut self, task_id: TaskId) -> TaskListResult<Vec<Task>> {
        self.move_task(task_id, MoveDirection::Up).await
    }

    /// Swaps a task with its successor in the manual order.
    ///
    /// A task already last is left in place without calling the store.
    ///
    /// # Errors
    ///
    /// See [`TaskBoard::move_up`].
    pub async fn move_down(&mut self, task_id: TaskId) -> TaskListResult<Vec<Task>> {
        self.move_task(task_id, MoveDirection::Down).await
    }

    async fn move_task(
        &mut self,
        task_id: TaskId,
        direction: MoveDirection,
    ) -> TaskListResult<Vec<Task>> {
        self.ensure_loaded(task_id)?;
        if !self.preferences.manual_reorder_enabled {
            return Err(TaskListError::ReorderDisabled);
        }
        if self.preferences.has_active_sort() {
            return Err(TaskListError::AutomaticSortActive);
        }
        if manual_neighbour(&self.tasks, task_id, direction).is_none() {
            debug!(%task_id, ?direction, "task already at manual order boundary");
            return Ok(self.owned_view());
        }

        let service = &self.service;
        match direction {
            MoveDirection::Up => {
                service
                    .call("move_up", service.store().move_up(task_id))
                    .await?
            }
            MoveDirection::Down => {
                service
                    .call("move_down", service.store().move_down(task_id))
                    .await?
            }
        };
        info!(patient_id = %self.patient_id, %task_id, ?direction, "moved task");
        self.reload().await
    }

    fn ensure_loaded(&self, task_id: TaskId) -> TaskListResult<()> {
        if self.tasks.iter().any(|task| task.id() == task_id) {
            Ok(())
        } else {
            Err(TaskListError::NotFound(task_id))
        }
    }

    fn owned_view(&self) -> Vec<Task> {
        self.view().into_iter().cloned().collect()
    }
}
