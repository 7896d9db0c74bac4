//! Purchasing: `POST /products/{id}/purchase` and `GET /orders`.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use uuid::Uuid;
use warden_core::Entry;
use warden_domain::{Purchase, product};

use crate::{
  AppState,
  error::ApiError,
  extract::{Authenticated, Id},
};

/// `POST /products/{id}/purchase` — 201 + the recorded purchase.
pub async fn purchase(
  State(state): State<AppState>,
  Authenticated(who): Authenticated,
  Id(id): Id<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
  let order =
    product::purchase(&state.products, &state.purchases, id, &who).await?;
  Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /orders` — the requester's purchase history.
pub async fn orders(
  State(state): State<AppState>,
  Authenticated(who): Authenticated,
) -> Json<Vec<Entry<Purchase>>> {
  Json(product::orders_of(&state.purchases, &who).await)
}
