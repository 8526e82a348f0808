//! Given steps for board ordering scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::given;
use serde_json::json;

#[given(r#"a column titled "{title}""#)]
fn column_titled(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create_column(&json!({ "title": title })));
    eyre::ensure!(created.is_success(), "column creation failed: {created:?}");

    let columns = run_async(world.service.list_columns())
        .into_result()
        .map_err(|failure| eyre::eyre!("listing columns failed: {failure:?}"))?;
    let column = columns
        .iter()
        .filter(|column| column.title().as_str() == title)
        .max_by_key(|column| column.position())
        .ok_or_else(|| eyre::eyre!("column {title} was not stored"))?;
    world.columns.insert(title, column.id());
    Ok(())
}

#[given(r#"a task "{title}" in column "{column}""#)]
fn task_in_column(world: &mut BoardWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let column_id = world.column(&column)?;
    let task = run_async(world.service.create_task(&json!({
        "title": title,
        "columnId": column_id.value(),
    })))
    .into_result()
    .map_err(|failure| eyre::eyre!("task creation failed: {failure:?}"))?;
    world.tasks.insert(title, task.id());
    Ok(())
}
