//! Application services for task list orchestration.

mod board;
mod config;
mod task_list;

pub use board::{TaskBoard, TaskSummary};
pub use config::TaskListConfig;
pub use task_list::{
    CreateTaskRequest, EditTaskRequest, TaskListError, TaskListResult, TaskListService,
};
