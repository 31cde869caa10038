//! Given steps for task list BDD scenarios.

use super::world::TaskListWorld;
use chrono::{NaiveDate, NaiveTime};
use cuido::task::domain::{
    DateRangeFilter, PersistedTaskData, SortDirection, StatusFilter, Task, TaskId, TaskPriority,
    TaskTitle,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

struct SeedTask<'a> {
    title: &'a str,
    priority: &'a str,
    due_on: Option<&'a str>,
    position: u32,
    completed: bool,
}

fn parse_day(value: &str) -> Result<NaiveDate, eyre::Report> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").wrap_err_with(|| format!("invalid date {value}"))
}

fn parse_direction(value: &str) -> Result<SortDirection, eyre::Report> {
    match value {
        "off" => Ok(SortDirection::Off),
        "ascending" => Ok(SortDirection::Ascending),
        "descending" => Ok(SortDirection::Descending),
        other => Err(eyre::eyre!("unknown sort direction {other}")),
    }
}

fn seed(world: &mut TaskListWorld, seed_task: &SeedTask<'_>) -> Result<(), eyre::Report> {
    let priority = TaskPriority::try_from(seed_task.priority).wrap_err("parse task priority")?;
    let due_at = seed_task
        .due_on
        .map(parse_day)
        .transpose()?
        .map(|day| day.and_time(NaiveTime::MIN).and_utc());
    let created_at = parse_day("2024-12-01")?.and_time(NaiveTime::MIN).and_utc();
    let task = Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        patient_id: world.patient_id,
        caregiver_id: None,
        title: TaskTitle::new(seed_task.title).wrap_err("build task title")?,
        description: None,
        due_at,
        priority,
        completed: seed_task.completed,
        completed_at: seed_task.completed.then_some(created_at),
        manual_order: i64::from(seed_task.position),
        created_at,
        updated_at: created_at,
    });
    world
        .store
        .seed([task.clone()])
        .wrap_err("seed task into store")?;
    world.seeded.push(task);
    Ok(())
}

#[given(r#"a task "{title}" with priority "{priority}" and no due date at position {position:u32}"#)]
fn undated_task(
    world: &mut TaskListWorld,
    title: String,
    priority: String,
    position: u32,
) -> Result<(), eyre::Report> {
    seed(
        world,
        &SeedTask {
            title: &title,
            priority: &priority,
            due_on: None,
            position,
            completed: false,
        },
    )
}

#[given(r#"a task "{title}" with priority "{priority}" due on "{due_on}" at position {position:u32}"#)]
fn dated_task(
    world: &mut TaskListWorld,
    title: String,
    priority: String,
    due_on: String,
    position: u32,
) -> Result<(), eyre::Report> {
    seed(
        world,
        &SeedTask {
            title: &title,
            priority: &priority,
            due_on: Some(&due_on),
            position,
            completed: false,
        },
    )
}

#[given(
    r#"a completed task "{title}" with priority "{priority}" and no due date at position {position:u32}"#
)]
fn completed_undated_task(
    world: &mut TaskListWorld,
    title: String,
    priority: String,
    position: u32,
) -> Result<(), eyre::Report> {
    seed(
        world,
        &SeedTask {
            title: &title,
            priority: &priority,
            due_on: None,
            position,
            completed: true,
        },
    )
}

#[given(r#"the date direction sort is "{direction}""#)]
fn date_direction_sort(world: &mut TaskListWorld, direction: String) -> Result<(), eyre::Report> {
    world.preferences = world
        .preferences
        .with_date_direction_sort(parse_direction(&direction)?);
    Ok(())
}

#[given(r#"the priority sort is "{direction}""#)]
fn priority_sort(world: &mut TaskListWorld, direction: String) -> Result<(), eyre::Report> {
    world.preferences = world
        .preferences
        .with_priority_sort(parse_direction(&direction)?);
    Ok(())
}

#[given(r#"the status filter is "{status}""#)]
fn status_filter(world: &mut TaskListWorld, status: String) -> Result<(), eyre::Report> {
    let filter = match status.as_str() {
        "all" => StatusFilter::All,
        "completed" => StatusFilter::Completed,
        "pending" => StatusFilter::Pending,
        other => return Err(eyre::eyre!("unknown status filter {other}")),
    };
    world.preferences = world.preferences.with_status_filter(filter);
    Ok(())
}

#[given(r#"the date range runs from "{start}" to "{end}""#)]
fn date_range(world: &mut TaskListWorld, start: String, end: String) -> Result<(), eyre::Report> {
    let range = DateRangeFilter::between(parse_day(&start)?, parse_day(&end)?);
    world.preferences = world.preferences.with_date_range(range);
    Ok(())
}

#[given("manual reordering is enabled")]
fn manual_reordering_enabled(world: &mut TaskListWorld) {
    world.preferences = world.preferences.with_manual_reorder(true);
}
