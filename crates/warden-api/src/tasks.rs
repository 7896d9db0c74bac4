//! Task reads, scoped to the requester: `GET /tasks` and `GET /tasks/{id}`.
//! Writes go through the generic handlers in [`resources`](crate::resources).

use std::sync::Arc;

use axum::{Json, extract::State};
use uuid::Uuid;
use warden_core::{Entry, ResourceTable};
use warden_domain::{Task, task};

use crate::{
  error::ApiError,
  extract::{Authenticated, Id},
};

/// `GET /tasks`
pub async fn mine(
  State(tasks): State<Arc<ResourceTable<Task>>>,
  Authenticated(who): Authenticated,
) -> Json<Vec<Entry<Task>>> {
  Json(task::tasks_of(&tasks, &who).await)
}

/// `GET /tasks/{id}` — 403 unless the requester owns the task or is an admin.
pub async fn get_mine(
  State(tasks): State<Arc<ResourceTable<Task>>>,
  Authenticated(who): Authenticated,
  Id(id): Id<Uuid>,
) -> Result<Json<Entry<Task>>, ApiError> {
  Ok(Json(task::task_for(&tasks, id, &who).await?))
}
