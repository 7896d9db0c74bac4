//! Error types for `warden-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("user {0:?} already exists")]
  DuplicateUser(String),

  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("invalid or expired token")]
  InvalidToken,

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("{kind} {id} not found")]
  NotFound { kind: &'static str, id: Uuid },

  #[error("validation failed: {0}")]
  Validation(String),

  /// A domain invariant refused the transition ("already borrowed", "out of
  /// stock", ...).
  #[error("{0}")]
  Conflict(String),

  #[error("password hashing error: {0}")]
  PasswordHash(String),

  #[error("token signing error: {0}")]
  TokenSigning(#[source] jsonwebtoken::errors::Error),

  #[error("token expiry is out of range")]
  ExpiryOutOfRange,
}

impl Error {
  pub fn forbidden(message: impl Into<String>) -> Self {
    Self::Forbidden(message.into())
  }

  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }

  pub fn conflict(message: impl Into<String>) -> Self {
    Self::Conflict(message.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
