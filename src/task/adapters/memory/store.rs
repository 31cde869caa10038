//! In-memory task store for tests and local sessions.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{MoveDirection, NewTask, PatientId, Task, TaskId, TaskPatch, manual_neighbour},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// New tasks are appended after the patient's highest manual position, moves
/// swap positions with the neighbouring task, and deletes renumber the
/// patient's remaining tasks densely from 1.
pub struct InMemoryTaskStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTaskStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl InMemoryTaskStore<DefaultClock> {
    /// Creates an empty store backed by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store using the given clock for timestamps.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Inserts already-persisted tasks verbatim, replacing any with the same
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the store lock is
    /// poisoned.
    pub fn seed(&self, tasks: impl IntoIterator<Item = Task>) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        for task in tasks {
            state.insert(task.id(), task);
        }
        Ok(())
    }

    fn read_state(&self) -> TaskStoreResult<RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.state.read().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> TaskStoreResult<RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.state.write().map_err(|err| {
            TaskStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn swap_with_neighbour(
        &self,
        task_id: TaskId,
        direction: MoveDirection,
    ) -> TaskStoreResult<Task> {
        let mut state = self.write_state()?;
        let patient_id = state
            .get(&task_id)
            .ok_or(TaskStoreError::NotFound(task_id))?
            .patient_id();

        let patient_tasks: Vec<Task> = sorted_for_patient(&state, patient_id)
            .into_iter()
            .cloned()
            .collect();
        let neighbour = manual_neighbour(&patient_tasks, task_id, direction)
            .map(|task| (task.id(), task.manual_order()));

        if let Some((neighbour_id, neighbour_order)) = neighbour {
            let own_order = state
                .get(&task_id)
                .ok_or(TaskStoreError::NotFound(task_id))?
                .manual_order();
            if let Some(neighbour_task) = state.get_mut(&neighbour_id) {
                neighbour_task.set_manual_order(own_order, &*self.clock);
            }
            if let Some(task) = state.get_mut(&task_id) {
                task.set_manual_order(neighbour_order, &*self.clock);
            }
        }

        state
            .get(&task_id)
            .cloned()
            .ok_or(TaskStoreError::NotFound(task_id))
    }
}

/// Returns a patient's tasks ordered by manual position.
fn sorted_for_patient(state: &HashMap<TaskId, Task>, patient_id: PatientId) -> Vec<&Task> {
    let mut tasks: Vec<&Task> = state
        .values()
        .filter(|task| task.patient_id() == patient_id)
        .collect();
    tasks.sort_by_key(|task| task.manual_order());
    tasks
}

#[async_trait]
impl<C> TaskStore for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn list_by_patient(&self, patient_id: PatientId) -> TaskStoreResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(sorted_for_patient(&state, patient_id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn create(&self, new_task: NewTask) -> TaskStoreResult<Task> {
        let mut state = self.write_state()?;
        let last_order = state
            .values()
            .filter(|task| task.patient_id() == new_task.patient_id)
            .map(Task::manual_order)
            .max()
            .unwrap_or(0);

        let task = Task::create(new_task, last_order.saturating_add(1), &*self.clock);
        state.insert(task.id(), task.clone());
        Ok(task)
    }

    async fn update(&self, task_id: TaskId, patch: TaskPatch) -> TaskStoreResult<Task> {
        let mut state = self.write_state()?;
        let task = state
            .get_mut(&task_id)
            .ok_or(TaskStoreError::NotFound(task_id))?;
        task.apply_patch(patch, &*self.clock);
        Ok(task.clone())
    }

    async fn toggle_completed(&self, task_id: TaskId) -> TaskStoreResult<Task> {
        let mut state = self.write_state()?;
        let task = state
            .get_mut(&task_id)
            .ok_or(TaskStoreError::NotFound(task_id))?;
        task.toggle_completed(&*self.clock);
        Ok(task.clone())
    }

    async fn delete(&self, task_id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.write_state()?;
        let removed = state
            .remove(&task_id)
            .ok_or(TaskStoreError::NotFound(task_id))?;

        let remaining: Vec<TaskId> = sorted_for_patient(&state, removed.patient_id())
            .into_iter()
            .map(Task::id)
            .collect();
        for (order, id) in (1_i64..).zip(remaining) {
            if let Some(task) = state.get_mut(&id) {
                task.set_manual_order(order, &*self.clock);
            }
        }
        Ok(())
    }

    async fn move_up(&self, task_id: TaskId) -> TaskStoreResult<Task> {
        self.swap_with_neighbour(task_id, MoveDirection::Up)
    }

    async fn move_down(&self, task_id: TaskId) -> TaskStoreResult<Task> {
        self.swap_with_neighbour(task_id, MoveDirection::Down)
    }
}
