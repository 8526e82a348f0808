//! Ordering, cascade and not-found behaviour against `PostgreSQL`.

use super::helpers::{add_column, add_task, execute_sql, test_pool, test_repository};
use chrono::Utc;
use kanban::board::adapters::postgres::PersistenceGateway;
use kanban::board::domain::{ColumnChanges, ColumnId, Description, TaskChanges, TaskId, Title};
use kanban::board::ports::{BoardRepository, BoardRepositoryError};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[ignore = "needs KANBAN_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn columns_append_after_the_current_maximum() -> Result<(), eyre::Report> {
    let repository = test_repository().await?;
    let baseline = repository
        .list_columns()
        .await?
        .iter()
        .map(|column| column.position().value())
        .max();

    let first = add_column(&repository, "First").await?;
    let second = add_column(&repository, "Second").await?;

    let columns = repository.list_columns().await?;
    let position_of = |id: ColumnId| {
        columns
            .iter()
            .find(|column| column.id() == id)
            .map(|column| column.position().value())
    };
    eyre::ensure!(
        position_of(first) == Some(baseline.map_or(1, |max| max + 1)),
        "first column must follow the existing maximum"
    );
    eyre::ensure!(
        position_of(second) == position_of(first).map(|position| position + 1),
        "second column must follow the first"
    );
    Ok(())
}

#[rstest]
#[ignore = "needs KANBAN_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_append_within_their_column() -> Result<(), eyre::Report> {
    let repository = test_repository().await?;
    let left = add_column(&repository, "Left").await?;
    let right = add_column(&repository, "Right").await?;

    let l0 = add_task(&repository, "l0", left).await?;
    let l1 = add_task(&repository, "l1", left).await?;
    let r0 = add_task(&repository, "r0", right).await?;

    eyre::ensure!(l0.position().value() == 0, "empty column starts at 0");
    eyre::ensure!(l1.position().value() == 1, "second task follows the max");
    eyre::ensure!(r0.position().value() == 0, "positions are column-scoped");
    Ok(())
}

#[rstest]
#[ignore = "needs KANBAN_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn create_task_in_missing_column_maps_the_foreign_key() -> Result<(), eyre::Report> {
    let repository = test_repository().await?;
    let missing = ColumnId::from_persisted(i32::MAX);

    let result = add_task(&repository, "orphan", missing).await;

    let err = result.err().ok_or_else(|| eyre::eyre!("orphan insert succeeded"))?;
    eyre::ensure!(
        matches!(
            err.downcast_ref::<BoardRepositoryError>(),
            Some(BoardRepositoryError::ColumnNotFound(id)) if *id == missing
        ),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
#[ignore = "needs KANBAN_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn update_task_keeps_position_and_clears_description() -> Result<(), eyre::Report> {
    let repository = test_repository().await?;
    let column_id = add_column(&repository, "Col").await?;
    add_task(&repository, "filler", column_id).await?;
    let task = add_task(&repository, "task", column_id).await?;

    let described = TaskChanges::new(
        Title::new("described")?,
        Description::new("notes"),
        column_id,
        &DefaultClock,
    );
    let with_notes = repository.update_task(task.id(), &described).await?;
    eyre::ensure!(
        with_notes.description().map(Description::as_str) == Some("notes"),
        "description stored"
    );

    let cleared = TaskChanges::new(Title::new("cleared")?, None, column_id, &DefaultClock);
    let updated = repository.update_task(task.id(), &cleared).await?;
    eyre::ensure!(updated.description().is_none(), "description cleared");
    eyre::ensure!(updated.position() == task.position(), "position kept");
    eyre::ensure!(updated.title().as_str() == "cleared", "title updated");
    Ok(())
}

#[rstest]
#[ignore = "needs KANBAN_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_missing_rows_is_not_found() -> Result<(), eyre::Report> {
    let repository = test_repository().await?;
    let column_id = add_column(&repository, "Col").await?;
    let before = repository.list_tasks().await?;

    let task_changes = TaskChanges::new(Title::new("ghost")?, None, column_id, &DefaultClock);
    let task_result = repository
        .update_task(TaskId::from_persisted(i32::MAX), &task_changes)
        .await;
    eyre::ensure!(
        matches!(task_result, Err(BoardRepositoryError::TaskNotFound(_))),
        "missing task must be reported"
    );

    let column_changes = ColumnChanges::new(Title::new("ghost")?, &DefaultClock);
    let column_result = repository
        .update_column(ColumnId::from_persisted(i32::MAX), &column_changes)
        .await;
    eyre::ensure!(
        matches!(column_result, Err(BoardRepositoryError::ColumnNotFound(_))),
        "missing column must be reported"
    );

    eyre::ensure!(repository.list_tasks().await? == before, "tasks unchanged");
    Ok(())
}

#[rstest]
#[ignore = "needs KANBAN_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn move_appends_to_target_tail_and_keeps_source() -> Result<(), eyre::Report> {
    let repository = test_repository().await?;
    let source = add_column(&repository, "A").await?;
    let target = add_column(&repository, "B").await?;
    let x = add_task(&repository, "X", source).await?;
    let y = add_task(&repository, "Y", source).await?;

    let moved = repository.move_task(x.id(), target, Utc::now()).await?;
    eyre::ensure!(moved.column_id() == target, "task changed column");
    eyre::ensure!(moved.position().value() == 0, "empty target starts at 0");

    let stayed = repository
        .find_task(y.id())
        .await?
        .ok_or_else(|| eyre::eyre!("Y missing"))?;
    eyre::ensure!(stayed.position() == y.position(), "source untouched");

    let missing = repository
        .move_task(TaskId::from_persisted(i32::MAX), target, Utc::now())
        .await;
    eyre::ensure!(
        matches!(missing, Err(BoardRepositoryError::TaskNotFound(_))),
        "moving a missing task must be reported"
    );
    Ok(())
}

#[rstest]
#[ignore = "needs KANBAN_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn delete_column_cascades_and_delete_task_reports_missing() -> Result<(), eyre::Report> {
    let repository = test_repository().await?;
    let doomed = add_column(&repository, "Doomed").await?;
    let task = add_task(&repository, "gone", doomed).await?;

    repository.delete_column(doomed).await?;

    eyre::ensure!(
        repository.find_task(task.id()).await?.is_none(),
        "tasks are removed with their column"
    );
    eyre::ensure!(
        matches!(
            repository.delete_column(doomed).await,
            Err(BoardRepositoryError::ColumnNotFound(_))
        ),
        "second delete reports the column missing"
    );
    eyre::ensure!(
        matches!(
            repository.delete_task(task.id()).await,
            Err(BoardRepositoryError::TaskNotFound(_))
        ),
        "cascaded task is gone"
    );
    Ok(())
}

#[rstest]
#[ignore = "needs KANBAN_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn blank_stored_titles_do_not_break_listing() -> Result<(), eyre::Report> {
    let pool = test_pool().await?;
    let repository = PersistenceGateway::from_pool(pool.clone()).repository();
    execute_sql(
        &pool,
        r#"INSERT INTO columns (title, "order") VALUES ('', 1000000)"#,
    )
    .await?;
    add_column(&repository, "Visible").await?;

    let columns = repository.list_columns().await?;
    eyre::ensure!(
        columns.iter().any(|column| column.title().as_str().is_empty()),
        "blank row is listed as stored"
    );
    eyre::ensure!(
        columns.iter().any(|column| column.title().as_str() == "Visible"),
        "other rows are still listed"
    );
    Ok(())
}
