//! Request handlers. Each one forwards to a single façade action.

use super::AppState;
use crate::board::domain::{Assignee, assignees};
use crate::board::services::{ActionErrorKind, ActionResult};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

pub(super) async fn get_board(State(state): State<AppState>) -> Response {
    respond(StatusCode::OK, state.service().board().await)
}

pub(super) async fn list_assignees() -> Json<&'static [Assignee]> {
    Json(assignees())
}

pub(super) async fn create_column(State(state): State<AppState>, body: Bytes) -> Response {
    let payload = parse_body(&body);
    respond(
        StatusCode::CREATED,
        state.service().create_column(&payload).await,
    )
}

pub(super) async fn update_column(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Response {
    let payload = parse_body(&body);
    respond(
        StatusCode::OK,
        state.service().update_column(id, &payload).await,
    )
}

pub(super) async fn delete_column(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    respond(StatusCode::OK, state.service().delete_column(id).await)
}

pub(super) async fn create_task(State(state): State<AppState>, body: Bytes) -> Response {
    let payload = parse_body(&body);
    respond(
        StatusCode::CREATED,
        state.service().create_task(&payload).await,
    )
}

pub(super) async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Response {
    let payload = parse_body(&body);
    respond(StatusCode::OK, state.service().update_task(id, &payload).await)
}

pub(super) async fn delete_task(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    respond(StatusCode::OK, state.service().delete_task(id).await)
}

pub(super) async fn move_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Response {
    let payload = parse_body(&body);
    respond(StatusCode::OK, state.service().move_task(id, &payload).await)
}

/// Malformed JSON becomes `null`, which validation reports against `_root`.
fn parse_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

fn respond<T: Serialize>(success: StatusCode, result: ActionResult<T>) -> Response {
    let status = result
        .failure()
        .map_or(success, |failure| status_for(failure.kind));
    (status, Json(result)).into_response()
}

const fn status_for(kind: ActionErrorKind) -> StatusCode {
    match kind {
        ActionErrorKind::Validation => StatusCode::BAD_REQUEST,
        ActionErrorKind::NotFound => StatusCode::NOT_FOUND,
        ActionErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
