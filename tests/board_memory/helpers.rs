//! Shared helpers for in-memory board integration tests.

use kanban::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Column, Task},
    services::BoardService,
};
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::json;
use std::sync::Arc;

/// Board service over a fresh in-memory store.
pub type MemoryService = BoardService<InMemoryBoardRepository, DefaultClock>;

/// Provides a board service with an empty in-memory store.
#[fixture]
pub fn service() -> MemoryService {
    BoardService::new(
        Arc::new(InMemoryBoardRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Creates a column through the façade and returns it.
///
/// # Errors
///
/// Returns an error if the action fails or the column cannot be found
/// afterwards.
pub async fn create_column(service: &MemoryService, title: &str) -> Result<Column, eyre::Report> {
    let result = service.create_column(&json!({ "title": title })).await;
    eyre::ensure!(result.is_success(), "column creation failed: {result:?}");
    let columns = service
        .list_columns()
        .await
        .into_result()
        .map_err(|failure| eyre::eyre!("listing columns failed: {failure:?}"))?;
    columns
        .into_iter()
        .rev()
        .find(|column| column.title().as_str() == title)
        .ok_or_else(|| eyre::eyre!("column {title} was not stored"))
}

/// Creates a task through the façade and returns it.
///
/// # Errors
///
/// Returns an error if the action fails.
pub async fn create_task(
    service: &MemoryService,
    title: &str,
    column: &Column,
) -> Result<Task, eyre::Report> {
    service
        .create_task(&json!({ "title": title, "columnId": column.id().value() }))
        .await
        .into_result()
        .map_err(|failure| eyre::eyre!("task creation failed: {failure:?}"))
}

/// Lists every task through the façade.
///
/// # Errors
///
/// Returns an error if the action fails.
pub async fn list_tasks(service: &MemoryService) -> Result<Vec<Task>, eyre::Report> {
    service
        .list_tasks()
        .await
        .into_result()
        .map_err(|failure| eyre::eyre!("listing tasks failed: {failure:?}"))
}
