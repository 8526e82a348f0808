//! When steps for board ordering scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::when;
use serde_json::json;

#[when(r#"task "{title}" is moved to column "{column}""#)]
fn move_task(world: &mut BoardWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let task_id = world.task(&title)?;
    let column_id = world.column(&column)?;
    let result = run_async(world.service.move_task(
        i64::from(task_id.value()),
        &json!({ "columnId": column_id.value() }),
    ));
    world.last_failure = result.failure().cloned();
    Ok(())
}

#[when(r#"a task with a blank title is created in column "{column}""#)]
fn create_blank_task(world: &mut BoardWorld, column: String) -> Result<(), eyre::Report> {
    let column_id = world.column(&column)?;
    let result = run_async(world.service.create_task(&json!({
        "title": "   ",
        "columnId": column_id.value(),
    })));
    world.last_failure = result.failure().cloned();
    Ok(())
}

#[when(r#"column "{column}" is deleted"#)]
fn delete_column(world: &mut BoardWorld, column: String) -> Result<(), eyre::Report> {
    let column_id = world.column(&column)?;
    let result = run_async(world.service.delete_column(i64::from(column_id.value())));
    world.last_failure = result.failure().cloned();
    Ok(())
}

#[when(r#"task {id:i64} is renamed to "{title}" in column "{column}""#)]
fn rename_task(
    world: &mut BoardWorld,
    id: i64,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let column_id = world.column(&column)?;
    let result = run_async(world.service.update_task(
        id,
        &json!({ "title": title, "columnId": column_id.value() }),
    ));
    world.last_failure = result.failure().cloned();
    Ok(())
}
