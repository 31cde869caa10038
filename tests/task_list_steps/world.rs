//! Shared world state for task list BDD scenarios.

use std::sync::Arc;

use cuido::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{PatientId, Task, ViewPreferences},
    services::{TaskListError, TaskListService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskListService = TaskListService<InMemoryTaskStore, DefaultClock>;

/// Scenario world for task list behaviour tests.
pub struct TaskListWorld {
    pub store: InMemoryTaskStore,
    pub service: TestTaskListService,
    pub patient_id: PatientId,
    pub preferences: ViewPreferences,
    pub seeded: Vec<Task>,
    pub listed: Option<Vec<String>>,
    pub last_move_result: Option<Result<Vec<Task>, TaskListError>>,
}

impl TaskListWorld {
    /// Creates a world with an empty store and default preferences.
    #[must_use]
    pub fn new() -> Self {
        let store = InMemoryTaskStore::new();
        let service = TaskListService::new(Arc::new(store.clone()), Arc::new(DefaultClock));
        Self {
            store,
            service,
            patient_id: PatientId::new(),
            preferences: ViewPreferences::default(),
            seeded: Vec::new(),
            listed: None,
            last_move_result: None,
        }
    }
}

impl Default for TaskListWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskListWorld {
    TaskListWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
