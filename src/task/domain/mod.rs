//! Domain model for patient task lists.
//!
//! The task domain models task records, the ephemeral view preferences a
//! caregiver applies to a list, and the pure projection that turns both into
//! display order. Persistence stays outside the domain boundary.

mod content;
mod error;
mod ids;
mod preferences;
mod priority;
mod projection;
mod task;

pub use content::{NewTask, TaskPatch, TaskTitle};
pub use error::{ParseTaskPriorityError, TaskDomainError};
pub use ids::{CaregiverId, PatientId, TaskId};
pub use preferences::{
    DateExistenceSort, DateRangeFilter, SortDirection, StatusFilter, ViewPreferences,
};
pub use priority::TaskPriority;
pub use projection::{MoveDirection, manual_neighbour, project};
pub use task::{DueStatus, PersistedTaskData, Task};
