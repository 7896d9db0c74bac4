//! Generic CRUD handlers, instantiated once per resource type in
//! [`api_router`](crate::api_router).
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/<r>` | Every record |
//! | `POST`   | `/<r>` | Body: the type's draft; 201 + entry |
//! | `GET`    | `/<r>/{id}` | 404 if not found |
//! | `PUT`    | `/<r>/{id}` | Body: the type's draft; owner or override role |
//! | `DELETE` | `/<r>/{id}` | 204; owner or override role |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;
use warden_core::{Entry, Record, ResourceTable};

use crate::{
  error::ApiError,
  extract::{Authenticated, Body, Id},
};

/// `GET /<r>`
pub async fn list<T>(
  State(table): State<Arc<ResourceTable<T>>>,
  _who: Authenticated,
) -> Json<Vec<Entry<T>>>
where
  T: Record + Serialize,
{
  Json(table.list().await)
}

/// `GET /<r>/{id}`
pub async fn get_one<T>(
  State(table): State<Arc<ResourceTable<T>>>,
  _who: Authenticated,
  Id(id): Id<Uuid>,
) -> Result<Json<Entry<T>>, ApiError>
where
  T: Record + Serialize,
{
  Ok(Json(table.get(id).await?))
}

/// `POST /<r>`
pub async fn create<T>(
  State(table): State<Arc<ResourceTable<T>>>,
  Authenticated(who): Authenticated,
  Body(draft): Body<T::Draft>,
) -> Result<impl IntoResponse, ApiError>
where
  T: Record + Serialize,
  T::Draft: DeserializeOwned,
{
  let entry = table.create(draft, &who).await?;
  Ok((StatusCode::CREATED, Json(entry)))
}

/// `PUT /<r>/{id}`
pub async fn update<T>(
  State(table): State<Arc<ResourceTable<T>>>,
  Authenticated(who): Authenticated,
  Id(id): Id<Uuid>,
  Body(draft): Body<T::Draft>,
) -> Result<Json<Entry<T>>, ApiError>
where
  T: Record + Serialize,
  T::Draft: DeserializeOwned,
{
  Ok(Json(table.update(id, draft, &who).await?))
}

/// `DELETE /<r>/{id}`
pub async fn delete<T>(
  State(table): State<Arc<ResourceTable<T>>>,
  Authenticated(who): Authenticated,
  Id(id): Id<Uuid>,
) -> Result<StatusCode, ApiError>
where
  T: Record,
{
  table.delete(id, &who).await?;
  Ok(StatusCode::NO_CONTENT)
}
