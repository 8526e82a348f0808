//! Façade results and board view consistency.

use super::helpers::{MemoryService, create_column, create_task, service};
use kanban::board::services::{ActionErrorKind, ActionResult};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_groups_tasks_under_their_columns(
    service: MemoryService,
) -> Result<(), eyre::Report> {
    let todo = create_column(&service, "Todo").await?;
    let done = create_column(&service, "Done").await?;
    create_task(&service, "write", &todo).await?;
    create_task(&service, "ship", &done).await?;
    create_task(&service, "review", &todo).await?;

    let board = service
        .board()
        .await
        .into_result()
        .map_err(|failure| eyre::eyre!("board failed: {failure:?}"))?;

    let shape: Vec<(String, Vec<String>)> = board
        .columns
        .iter()
        .map(|entry| {
            (
                entry.column.title().as_str().to_owned(),
                entry
                    .tasks
                    .iter()
                    .map(|task| task.title().as_str().to_owned())
                    .collect(),
            )
        })
        .collect();
    eyre::ensure!(
        shape
            == vec![
                ("Todo".to_owned(), vec!["write".to_owned(), "review".to_owned()]),
                ("Done".to_owned(), vec!["ship".to_owned()]),
            ],
        "unexpected board: {shape:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_reflects_every_successful_mutation(
    service: MemoryService,
) -> Result<(), eyre::Report> {
    let column = create_column(&service, "Todo").await?;
    let task = create_task(&service, "draft", &column).await?;
    let task_id = i64::from(task.id().value());

    let steps = [
        service
            .update_task(
                task_id,
                &json!({ "title": "final", "columnId": column.id().value() }),
            )
            .await,
        service
            .update_column(i64::from(column.id().value()), &json!({ "title": "Doing" }))
            .await,
    ];
    eyre::ensure!(
        steps.iter().all(ActionResult::is_success),
        "mutations failed: {steps:?}"
    );

    let board = service
        .board()
        .await
        .into_result()
        .map_err(|failure| eyre::eyre!("board failed: {failure:?}"))?;
    let entry = board
        .column(column.id())
        .ok_or_else(|| eyre::eyre!("column missing"))?;
    eyre::ensure!(entry.column.title().as_str() == "Doing", "column not renamed");
    eyre::ensure!(
        entry.tasks.first().map(|item| item.title().as_str()) == Some("final"),
        "task not renamed"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_creation_in_missing_column_is_not_found(
    service: MemoryService,
) -> Result<(), eyre::Report> {
    let result = service
        .create_task(&json!({ "title": "orphan", "columnId": 9 }))
        .await;
    let failure = result
        .failure()
        .ok_or_else(|| eyre::eyre!("orphan task was accepted"))?;
    eyre::ensure!(failure.kind == ActionErrorKind::NotFound, "wrong kind");
    eyre::ensure!(failure.error == "Failed to create task", "wrong message");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_assignee_is_rejected(service: MemoryService) -> Result<(), eyre::Report> {
    let column = create_column(&service, "Todo").await?;
    let result = service
        .create_task(&json!({
            "title": "assigned",
            "columnId": column.id().value(),
            "assigneeId": "404",
        }))
        .await;

    let json = serde_json::to_value(&result)?;
    eyre::ensure!(json["kind"] == "validation", "unexpected result: {json}");
    eyre::ensure!(
        json["details"]["assigneeId"] == json!(["Unknown assignee"]),
        "unexpected details: {json}"
    );
    Ok(())
}
