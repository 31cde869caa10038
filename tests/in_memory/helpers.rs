//! Shared test helpers for in-memory store integration tests.

use std::sync::Arc;

use cuido::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{PatientId, Task},
    services::{CreateTaskRequest, TaskBoard, TaskListService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the in-memory integration tests.
pub type TestService = TaskListService<InMemoryTaskStore, DefaultClock>;

/// Board type used by the in-memory integration tests.
pub type TestBoard = TaskBoard<InMemoryTaskStore, DefaultClock>;

/// Provides a fresh in-memory store for each test.
#[fixture]
pub fn store() -> InMemoryTaskStore {
    InMemoryTaskStore::new()
}

/// Provides a patient ID for tests.
#[fixture]
pub fn patient_id() -> PatientId {
    PatientId::new()
}

/// Builds a service over a clone of the shared store.
#[must_use]
pub fn service_for(store: &InMemoryTaskStore) -> TestService {
    TaskListService::new(Arc::new(store.clone()), Arc::new(DefaultClock))
}

/// Creates one task per title, in order, and returns the final projection.
///
/// # Errors
///
/// Returns an error if any create call fails.
pub async fn create_all(
    board: &mut TestBoard,
    names: &[&str],
) -> Result<Vec<Task>, Box<dyn std::error::Error + Send + Sync>> {
    let mut latest = board.tasks().to_vec();
    for title in names {
        latest = board.create(CreateTaskRequest::new(*title)).await?;
    }
    Ok(latest)
}

/// Returns the titles of the given tasks in order.
#[must_use]
pub fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title().as_str()).collect()
}

/// Finds a task by title.
///
/// # Errors
///
/// Returns an error naming the title when no task matches.
pub fn find<'a>(tasks: &'a [Task], title: &str) -> Result<&'a Task, String> {
    tasks
        .iter()
        .find(|task| task.title().as_str() == title)
        .ok_or_else(|| format!("no task titled {title}"))
}
