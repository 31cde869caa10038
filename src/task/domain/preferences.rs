//! View preferences controlling how a task list is filtered and ordered.
//!
//! Preferences are ephemeral: callers create them with defaults when a task
//! list is opened, mutate them in response to user interaction, and pass them
//! into [`super::project`] explicitly.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Grouping of tasks by whether they carry a due date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateExistenceSort {
    /// No grouping.
    #[default]
    Off,
    /// Dated tasks before undated ones.
    HasDateFirst,
    /// Undated tasks before dated ones.
    NoDateFirst,
}

impl DateExistenceSort {
    /// Advances to the next setting: off, dated first, undated first, off.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Off => Self::HasDateFirst,
            Self::HasDateFirst => Self::NoDateFirst,
            Self::NoDateFirst => Self::Off,
        }
    }

    /// Returns whether this sort is applied.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Off)
    }
}

/// Direction of an ordered sort pass.
///
/// For priority sorting, `Ascending` orders by increasing weight (low to
/// high).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Pass disabled.
    #[default]
    Off,
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Advances to the next setting: off, ascending, descending, off.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::Off => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Off,
        }
    }

    /// Returns whether this sort is applied.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Off)
    }
}

/// Completion-state filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Every task.
    #[default]
    All,
    /// Only completed tasks.
    Completed,
    /// Only pending tasks.
    Pending,
}

impl StatusFilter {
    /// Returns whether a task with the given completion flag passes.
    #[must_use]
    pub const fn accepts(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Completed => completed,
            Self::Pending => !completed,
        }
    }
}

/// Inclusive calendar-day range on task due dates.
///
/// `start` covers its whole day from midnight and `end` extends through
/// `23:59:59.999` (UTC). Either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRangeFilter {
    /// First included day.
    pub start: Option<NaiveDate>,
    /// Last included day.
    pub end: Option<NaiveDate>,
}

impl DateRangeFilter {
    /// Creates a range with both bounds set.
    #[must_use]
    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Returns whether at least one bound is set.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Returns whether a task with the given due timestamp passes.
    ///
    /// When no bound is set everything passes. Otherwise undated tasks never
    /// pass.
    #[must_use]
    pub fn accepts(&self, due_at: Option<DateTime<Utc>>) -> bool {
        if !self.is_set() {
            return true;
        }
        let Some(due) = due_at else {
            return false;
        };
        let after_start = self
            .start
            .is_none_or(|start| due >= start.and_time(NaiveTime::MIN).and_utc());
        let before_end = self.end.is_none_or(|end| due <= end_of_day(end));
        after_start && before_end
    }
}

fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.succ_opt().map_or(DateTime::<Utc>::MAX_UTC, |next| {
        next.and_time(NaiveTime::MIN).and_utc() - TimeDelta::milliseconds(1)
    })
}

/// Filter and sort settings for a task list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewPreferences {
    /// Pass 1: grouping by due-date presence.
    pub date_existence_sort: DateExistenceSort,
    /// Pass 2: ordering by due date.
    pub date_direction_sort: SortDirection,
    /// Pass 3: ordering by priority weight.
    pub priority_sort: SortDirection,
    /// Completion-state filter.
    pub status_filter: StatusFilter,
    /// Due-date range filter.
    pub date_range_filter: DateRangeFilter,
    /// Whether the user has switched on move-up/move-down controls.
    pub manual_reorder_enabled: bool,
}

impl ViewPreferences {
    /// Returns whether any automatic sort pass is on.
    #[must_use]
    pub const fn has_active_sort(&self) -> bool {
        self.date_existence_sort.is_active()
            || self.date_direction_sort.is_active()
            || self.priority_sort.is_active()
    }

    /// Returns whether move-up/move-down operations are permitted.
    #[must_use]
    pub const fn allows_manual_reorder(&self) -> bool {
        self.manual_reorder_enabled && !self.has_active_sort()
    }

    /// Sets the completion-state filter.
    #[must_use]
    pub const fn with_status_filter(mut self, status_filter: StatusFilter) -> Self {
        self.status_filter = status_filter;
        self
    }

    /// Sets the due-date range filter.
    #[must_use]
    pub const fn with_date_range(mut self, date_range_filter: DateRangeFilter) -> Self {
        self.date_range_filter = date_range_filter;
        self
    }

    /// Sets the due-date presence grouping.
    #[must_use]
    pub const fn with_date_existence_sort(mut self, sort: DateExistenceSort) -> Self {
        self.date_existence_sort = sort;
        self
    }

    /// Sets the due-date ordering.
    #[must_use]
    pub const fn with_date_direction_sort(mut self, sort: SortDirection) -> Self {
        self.date_direction_sort = sort;
        self
    }

    /// Sets the priority ordering.
    #[must_use]
    pub const fn with_priority_sort(mut self, sort: SortDirection) -> Self {
        self.priority_sort = sort;
        self
    }

    /// Enables or disables manual reordering controls.
    #[must_use]
    pub const fn with_manual_reorder(mut self, enabled: bool) -> Self {
        self.manual_reorder_enabled = enabled;
        self
    }
}
