//! Handlers for `/register` and `/login`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/register` | Body: `{"username","password","role"?}`; 201 + account |
//! | `POST` | `/login` | Body: `{"username","password"}`; 200 + `{"token","expires_at"}` |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use warden_core::{IdentityStore, IssuedToken, Role};

use crate::{error::ApiError, extract::Body};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  #[serde(alias = "user_name")]
  pub username: String,
  pub password: String,
  /// Defaults to `user`.
  #[serde(default)]
  pub role:     Role,
}

/// `POST /register`
pub async fn register(
  State(identity): State<Arc<IdentityStore>>,
  Body(body): Body<RegisterBody>,
) -> Result<impl IntoResponse, ApiError> {
  let account = identity
    .register(&body.username, &body.password, body.role)
    .await?;
  Ok((StatusCode::CREATED, Json(account)))
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  #[serde(alias = "user_name")]
  pub username: String,
  pub password: String,
}

/// `POST /login`
pub async fn login(
  State(identity): State<Arc<IdentityStore>>,
  Body(body): Body<LoginBody>,
) -> Result<Json<IssuedToken>, ApiError> {
  let issued = identity.authenticate(&body.username, &body.password).await?;
  Ok(Json(issued))
}
