//! Display-order projection of a patient's tasks.

use super::{DateExistenceSort, SortDirection, Task, TaskId, ViewPreferences};
use chrono::{DateTime, Utc};
use std::cmp::{Ordering, Reverse};

/// Computes the filtered, ordered view of `tasks` for `prefs`.
///
/// Filtering keeps tasks that pass the status filter and then the date-range
/// filter. When no sort pass is active the survivors are ordered by
/// `manual_order`. Otherwise up to three stable sorts run over the whole list
/// in the fixed order existence, direction, priority, so the last pass that
/// runs decides every comparison it does not consider equal.
///
/// # Examples
///
/// ```
/// use cuido::task::domain::{project, SortDirection, ViewPreferences};
///
/// let prefs = ViewPreferences::default().with_priority_sort(SortDirection::Descending);
/// assert!(project(&[], &prefs).is_empty());
/// ```
#[must_use]
pub fn project<'a>(tasks: &'a [Task], prefs: &ViewPreferences) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|task| prefs.status_filter.accepts(task.is_completed()))
        .filter(|task| prefs.date_range_filter.accepts(task.due_at()))
        .collect();

    if !prefs.has_active_sort() {
        visible.sort_by_key(|task| task.manual_order());
        return visible;
    }

    match prefs.date_existence_sort {
        DateExistenceSort::Off => {}
        DateExistenceSort::HasDateFirst => visible.sort_by_key(|task| task.due_at().is_none()),
        DateExistenceSort::NoDateFirst => visible.sort_by_key(|task| task.due_at().is_some()),
    }

    if prefs.date_direction_sort.is_active() {
        let direction = prefs.date_direction_sort;
        visible.sort_by(|a, b| compare_due_dates(a.due_at(), b.due_at(), direction));
    }

    match prefs.priority_sort {
        SortDirection::Off => {}
        SortDirection::Ascending => visible.sort_by_key(|task| task.priority().weight()),
        SortDirection::Descending => {
            visible.sort_by_key(|task| Reverse(task.priority().weight()));
        }
    }

    visible
}

/// Orders due dates in `direction`, keeping undated tasks last either way.
fn compare_due_dates(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left), Some(right)) => match direction {
            SortDirection::Descending => right.cmp(&left),
            SortDirection::Off | SortDirection::Ascending => left.cmp(&right),
        },
    }
}

/// Direction of a manual reorder step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    /// Towards the start of the manual order.
    Up,
    /// Towards the end of the manual order.
    Down,
}

/// Finds the task adjacent to `task_id` in the full manual order.
///
/// The lookup ignores any view filtering. Returns `None` when `task_id` is
/// absent or already at the boundary in `direction`.
#[must_use]
pub fn manual_neighbour(tasks: &[Task], task_id: TaskId, direction: MoveDirection) -> Option<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by_key(|task| task.manual_order());

    let position = ordered.iter().position(|task| task.id() == task_id)?;
    let neighbour_position = match direction {
        MoveDirection::Up => position.checked_sub(1)?,
        MoveDirection::Down => position.checked_add(1)?,
    };
    ordered.get(neighbour_position).copied()
}
