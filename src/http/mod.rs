//! JSON-over-HTTP surface for board actions.
//!
//! Every response body is an [`ActionResult`](crate::board::services::ActionResult)
//! except the assignee directory, which is a bare array. Failure kinds map
//! to `400`, `404` and `500`.

mod handlers;

use crate::board::{ports::BoardRepository, services::BoardService};
use axum::Router;
use axum::routing::{get, patch, post};
use mockable::DefaultClock;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Board service as shared by request handlers.
pub type SharedBoardService = Arc<BoardService<dyn BoardRepository, DefaultClock>>;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    service: SharedBoardService,
}

impl AppState {
    /// Wraps a board service for use by the router.
    #[must_use]
    pub const fn new(service: SharedBoardService) -> Self {
        Self { service }
    }

    /// Builds state over `repository` with the system clock.
    #[must_use]
    pub fn from_repository(repository: Arc<dyn BoardRepository>) -> Self {
        Self::new(Arc::new(BoardService::new(
            repository,
            Arc::new(DefaultClock),
        )))
    }

    /// Returns the board service.
    #[must_use]
    pub const fn service(&self) -> &SharedBoardService {
        &self.service
    }
}

/// Creates the API router.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/board", get(handlers::get_board))
        .route("/api/assignees", get(handlers::list_assignees))
        .route("/api/columns", post(handlers::create_column))
        .route(
            "/api/columns/{id}",
            patch(handlers::update_column).delete(handlers::delete_column),
        )
        .route("/api/tasks", post(handlers::create_task))
        .route(
            "/api/tasks/{id}",
            patch(handlers::update_task).delete(handlers::delete_task),
        )
        .route("/api/tasks/{id}/move", post(handlers::move_task))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
