//! Request extractors: JSON bodies and path parameters with [`ApiError`]
//! rejections, and the bearer-token [`Authenticated`] principal.

use std::sync::Arc;

use axum::{
  extract::{FromRef, FromRequest, FromRequestParts},
  http::{HeaderMap, header, request::Parts},
};
use warden_core::{Claims, IdentityStore, Principal};

use crate::error::ApiError;

/// `axum::Json`, but malformed bodies become a 400 [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Body<T>(pub T);

/// `axum::extract::Path`, but an unparsable segment becomes a 400
/// [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Id<T>(pub T);

/// The principal of a request carrying a valid `Authorization: Bearer` token.
pub struct Authenticated(pub Principal);

/// Pull the bearer token out of `headers` and verify it.
pub fn verify_bearer(
  headers: &HeaderMap,
  identity: &IdentityStore,
) -> Result<Claims, ApiError> {
  let token = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .ok_or(ApiError::MissingToken)?;

  Ok(identity.verify_token(token)?)
}

impl<S> FromRequestParts<S> for Authenticated
where
  Arc<IdentityStore>: FromRef<S>,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let identity = Arc::<IdentityStore>::from_ref(state);
    let claims = verify_bearer(&parts.headers, &identity)?;
    Ok(Authenticated(claims.principal()))
  }
}
