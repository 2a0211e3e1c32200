use super::protocol::*;
use super::service::TaskService;
use super::types::*;
use crate::error::{DatabaseError, Result};

use axum::body::Bytes;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

/// Builds the task database router around a shared service.
pub fn router(service: Arc<TaskService>) -> Router {
    Router::new()
        .route(ENDPOINT_GET_BY_ID, get(handle_get_by_id).fallback(only_get))
        .route(ENDPOINT_NEW_TASK, post(handle_new_task).fallback(only_post))
        .route(
            ENDPOINT_GET_NEW_TASK,
            post(handle_get_new_task).fallback(only_post),
        )
        .route(
            ENDPOINT_FINISH_TASK,
            post(handle_finish_task).fallback(only_post),
        )
        .route(ENDPOINT_SET_BY_ID, post(handle_set_by_id).fallback(only_post))
        .route(ENDPOINT_LIST, get(handle_list).fallback(only_get))
        .layer(Extension(service))
}

pub async fn handle_get_by_id(
    Extension(service): Extension<Arc<TaskService>>,
    Query(params): Query<IdParams>,
) -> Result<Json<Task>> {
    let id = parse_id(&params)?;
    let task = service.get(id).await?;
    Ok(Json(task))
}

pub async fn handle_new_task(Extension(service): Extension<Arc<TaskService>>) -> String {
    service.create().await.to_string()
}

pub async fn handle_get_new_task(
    Extension(service): Extension<Arc<TaskService>>,
) -> Result<Json<Task>> {
    let task = service.fetch_next().await?;
    Ok(Json(task))
}

pub async fn handle_finish_task(
    Extension(service): Extension<Arc<TaskService>>,
    Query(params): Query<IdParams>,
) -> Result<&'static str> {
    let id = parse_id(&params)?;
    service.finish(id).await?;
    Ok(SUCCESS)
}

pub async fn handle_set_by_id(
    Extension(service): Extension<Arc<TaskService>>,
    body: Bytes,
) -> Result<&'static str> {
    let req: OverwriteRequest = serde_json::from_slice(&body)
        .map_err(|e| DatabaseError::InvalidArgument(e.to_string()))?;
    let state = TaskState::try_from(req.state)?;

    service.overwrite(req.id, state).await?;
    Ok(SUCCESS)
}

pub async fn handle_list(Extension(service): Extension<Arc<TaskService>>) -> String {
    format_listing(&service.enumerate().await)
}

async fn only_get() -> (StatusCode, &'static str) {
    (StatusCode::BAD_REQUEST, ONLY_GET)
}

async fn only_post() -> (StatusCode, &'static str) {
    (StatusCode::BAD_REQUEST, ONLY_POST)
}

fn parse_id(params: &IdParams) -> Result<usize> {
    let raw = params
        .id
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| DatabaseError::InvalidArgument("missing id".to_string()))?;

    raw.parse::<usize>()
        .map_err(|e| DatabaseError::InvalidArgument(format!("id {:?}: {}", raw, e)))
}
