//! Book lending: `POST /books/{id}/borrow` and `POST /books/{id}/return`.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
};
use uuid::Uuid;
use warden_core::{Entry, ResourceTable};
use warden_domain::{Book, book};

use crate::{
  error::ApiError,
  extract::{Authenticated, Id},
};

/// `POST /books/{id}/borrow`
pub async fn borrow(
  State(books): State<Arc<ResourceTable<Book>>>,
  Authenticated(who): Authenticated,
  Id(id): Id<Uuid>,
) -> Result<Json<Entry<Book>>, ApiError> {
  Ok(Json(book::borrow(&books, id, &who).await?))
}

/// `POST /books/{id}/return`
pub async fn give_back(
  State(books): State<Arc<ResourceTable<Book>>>,
  Authenticated(who): Authenticated,
  Id(id): Id<Uuid>,
) -> Result<Json<Entry<Book>>, ApiError> {
  Ok(Json(book::give_back(&books, id, &who).await?))
}
