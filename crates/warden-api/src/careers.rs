//! Job applications: `POST /jobs/{id}/apply` and `GET /applications`.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use uuid::Uuid;
use warden_core::Entry;
use warden_domain::{Application, job};

use crate::{
  AppState,
  error::ApiError,
  extract::{Authenticated, Id},
};

/// `POST /jobs/{id}/apply` — 201 + the recorded application.
pub async fn apply(
  State(state): State<AppState>,
  Authenticated(who): Authenticated,
  Id(id): Id<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
  let application =
    job::apply(&state.jobs, &state.applications, id, &who).await?;
  Ok((StatusCode::CREATED, Json(application)))
}

/// `GET /applications` — the requester's application history.
pub async fn history(
  State(state): State<AppState>,
  Authenticated(who): Authenticated,
) -> Json<Vec<Entry<Application>>> {
  Json(job::applications_of(&state.applications, &who).await)
}
