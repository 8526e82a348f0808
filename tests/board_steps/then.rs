//! Then steps for board ordering scenarios.

use super::world::{BoardWorld, run_async};
use kanban::board::services::ActionErrorKind;
use rstest_bdd_macros::then;

fn titles_in(world: &BoardWorld, column: &str) -> Result<Vec<String>, eyre::Report> {
    let column_id = world.column(column)?;
    let board = run_async(world.service.board())
        .into_result()
        .map_err(|failure| eyre::eyre!("loading the board failed: {failure:?}"))?;
    let entry = board
        .column(column_id)
        .ok_or_else(|| eyre::eyre!("column {column} is missing from the board"))?;
    Ok(entry
        .tasks
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect())
}

fn split_titles(titles: &str) -> Vec<String> {
    titles.split(',').map(|title| title.trim().to_owned()).collect()
}

#[then(r#"column "{column}" lists tasks "{titles}""#)]
fn column_lists_tasks(world: &BoardWorld, column: String, titles: String) -> Result<(), eyre::Report> {
    let actual = titles_in(world, &column)?;
    let expected = split_titles(&titles);
    if actual != expected {
        return Err(eyre::eyre!(
            "expected column {column} to list {expected:?}, found {actual:?}"
        ));
    }
    Ok(())
}

#[then(r#"column "{column}" has no tasks"#)]
fn column_has_no_tasks(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let actual = titles_in(world, &column)?;
    if !actual.is_empty() {
        return Err(eyre::eyre!("expected column {column} to be empty, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"task "{title}" has position {position:i32}"#)]
fn task_has_position(world: &BoardWorld, title: String, position: i32) -> Result<(), eyre::Report> {
    let task_id = world.task(&title)?;
    let tasks = world.current_tasks()?;
    let task = tasks
        .iter()
        .find(|task| task.id() == task_id)
        .ok_or_else(|| eyre::eyre!("task {title} is no longer stored"))?;
    if task.position().value() != position {
        return Err(eyre::eyre!(
            "expected task {title} at position {position}, found {}",
            task.position().value()
        ));
    }
    Ok(())
}

#[then(r#"the board shows columns "{titles}""#)]
fn board_shows_columns(world: &BoardWorld, titles: String) -> Result<(), eyre::Report> {
    let board = run_async(world.service.board())
        .into_result()
        .map_err(|failure| eyre::eyre!("loading the board failed: {failure:?}"))?;
    let actual: Vec<String> = board
        .columns
        .iter()
        .map(|entry| entry.column.title().as_str().to_owned())
        .collect();
    let expected = split_titles(&titles);
    if actual != expected {
        return Err(eyre::eyre!("expected columns {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"the action fails with a validation error on "{field}""#)]
fn fails_with_validation_error(world: &BoardWorld, field: String) -> Result<(), eyre::Report> {
    let failure = world
        .last_failure
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the last action to fail"))?;
    if failure.kind != ActionErrorKind::Validation {
        return Err(eyre::eyre!("expected a validation failure, got {failure:?}"));
    }
    let reported = failure
        .details
        .fields()
        .is_some_and(|fields| fields.contains(&field));
    if !reported {
        return Err(eyre::eyre!("expected an error on {field}, got {failure:?}"));
    }
    Ok(())
}

#[then("the action fails with a not found error")]
fn fails_with_not_found(world: &BoardWorld) -> Result<(), eyre::Report> {
    let failure = world
        .last_failure
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the last action to fail"))?;
    if failure.kind != ActionErrorKind::NotFound {
        return Err(eyre::eyre!("expected a not found failure, got {failure:?}"));
    }
    Ok(())
}
