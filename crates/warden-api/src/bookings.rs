//! Event bookings: `POST /events/{id}/book` and `GET /bookings`.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
};
use uuid::Uuid;
use warden_core::{Entry, ResourceTable};
use warden_domain::{Event, event};

use crate::{
  error::ApiError,
  extract::{Authenticated, Id},
};

/// `POST /events/{id}/book`
pub async fn book(
  State(events): State<Arc<ResourceTable<Event>>>,
  Authenticated(who): Authenticated,
  Id(id): Id<Uuid>,
) -> Result<Json<Entry<Event>>, ApiError> {
  Ok(Json(event::book(&events, id, &who).await?))
}

/// `GET /bookings` — events the requester has booked.
pub async fn mine(
  State(events): State<Arc<ResourceTable<Event>>>,
  Authenticated(who): Authenticated,
) -> Json<Vec<Entry<Event>>> {
  Json(event::bookings_of(&events, &who).await)
}
