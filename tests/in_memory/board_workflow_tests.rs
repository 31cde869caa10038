//! In-memory integration tests for the task board lifecycle.

use super::helpers::{create_all, find, patient_id, service_for, store, titles};
use chrono::{TimeZone, Utc};
use cuido::task::{
    adapters::memory::InMemoryTaskStore,
    domain::{PatientId, SortDirection, Task, TaskPriority, ViewPreferences},
    services::{CreateTaskRequest, EditTaskRequest, TaskListError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_tasks_append_in_creation_order(store: InMemoryTaskStore, patient_id: PatientId) {
    let service = service_for(&store);
    let mut board = service
        .open_board(patient_id)
        .await
        .expect("board should open");

    let listed = create_all(&mut board, &["Morning pills", "Lunch", "Evening walk"])
        .await
        .expect("creates should succeed");

    assert_eq!(titles(&listed), ["Morning pills", "Lunch", "Evening walk"]);
    let orders: Vec<i64> = board.tasks().iter().map(Task::manual_order).collect();
    assert_eq!(orders, [1, 2, 3]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_then_sort_by_priority(store: InMemoryTaskStore, patient_id: PatientId) {
    let service = service_for(&store);
    let mut board = service
        .open_board(patient_id)
        .await
        .expect("board should open");
    let listed = create_all(&mut board, &["Groceries", "Insulin"])
        .await
        .expect("creates should succeed");
    let insulin = find(&listed, "Insulin").expect("insulin task").id();
    let due = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().expect("valid time");

    board
        .edit(
            insulin,
            EditTaskRequest::new("Insulin refill")
                .with_priority(TaskPriority::High)
                .with_due_at(due),
        )
        .await
        .expect("edit should succeed");
    let sorted: Vec<String> = board
        .set_preferences(ViewPreferences::default().with_priority_sort(SortDirection::Descending))
        .into_iter()
        .map(|task| task.title().as_str().to_owned())
        .collect();

    assert_eq!(sorted, ["Insulin refill", "Groceries"]);
    let edited = find(board.tasks(), "Insulin refill").expect("edited task");
    assert_eq!(edited.due_at(), Some(due));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggle_and_delete_update_the_summary(store: InMemoryTaskStore, patient_id: PatientId) {
    let service = service_for(&store);
    let mut board = service
        .open_board(patient_id)
        .await
        .expect("board should open");
    let listed = create_all(&mut board, &["Bath", "Laundry", "Doctor call"])
        .await
        .expect("creates should succeed");
    let bath = find(&listed, "Bath").expect("bath task").id();
    let laundry = find(&listed, "Laundry").expect("laundry task").id();

    board
        .toggle_completed(bath)
        .await
        .expect("toggle should succeed");
    let remaining = board.delete(laundry).await.expect("delete should succeed");

    assert_eq!(titles(&remaining), ["Bath", "Doctor call"]);
    let summary = board.summary();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.pending, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_titles_leave_the_board_untouched(store: InMemoryTaskStore, patient_id: PatientId) {
    let service = service_for(&store);
    let mut board = service
        .open_board(patient_id)
        .await
        .expect("board should open");
    let listed = create_all(&mut board, &["Stretching"])
        .await
        .expect("create should succeed");
    let stretching = find(&listed, "Stretching").expect("task").id();

    let created = board.create(CreateTaskRequest::new("   ")).await;
    let edited = board.edit(stretching, EditTaskRequest::new("")).await;

    assert!(matches!(created, Err(TaskListError::Validation(_))));
    assert!(matches!(edited, Err(TaskListError::Validation(_))));
    assert_eq!(titles(board.tasks()), ["Stretching"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn boards_for_different_patients_share_a_store(store: InMemoryTaskStore) {
    let service = service_for(&store);
    let mut first = service
        .open_board(PatientId::new())
        .await
        .expect("board should open");
    let mut second = service
        .open_board(PatientId::new())
        .await
        .expect("board should open");

    create_all(&mut first, &["First patient task"])
        .await
        .expect("create should succeed");
    let reloaded = second.reload().await.expect("reload should succeed");

    assert!(reloaded.is_empty());
    let reopened = service
        .open_board(first.patient_id())
        .await
        .expect("board should reopen");
    assert_eq!(titles(reopened.tasks()), ["First patient task"]);
}
