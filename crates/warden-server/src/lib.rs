//! Warden server assembly: configuration, state construction, and the
//! top-level router with request tracing.

use axum::Router;
use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use warden_api::{AppState, api_router};
use warden_core::{IdentityStore, TokenIssuer, token::DEFAULT_TOKEN_TTL_HOURS};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `WARDEN_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:            String,
  #[serde(default = "default_port")]
  pub port:            u16,
  /// Symmetric key used to sign and verify bearer tokens.
  pub jwt_secret:      String,
  #[serde(default = "default_token_ttl_hours")]
  pub token_ttl_hours: i64,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3000 }
fn default_token_ttl_hours() -> i64 { DEFAULT_TOKEN_TTL_HOURS }

/// Upper bound on `token_ttl_hours` (ten years).
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365 * 10;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("jwt_secret must not be empty")]
  EmptySecret,
  #[error("token_ttl_hours must be positive, got {0}")]
  NonPositiveTtl(i64),
  #[error("token_ttl_hours must be at most {max}, got {0}", max = MAX_TOKEN_TTL_HOURS)]
  TtlTooLarge(i64),
}

impl ServerConfig {
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.jwt_secret.is_empty() {
      return Err(ConfigError::EmptySecret);
    }
    self.token_ttl().map(|_| ())
  }

  /// `token_ttl_hours` as a [`Duration`], within `1..=MAX_TOKEN_TTL_HOURS`.
  pub fn token_ttl(&self) -> Result<Duration, ConfigError> {
    let hours = self.token_ttl_hours;
    if hours <= 0 {
      return Err(ConfigError::NonPositiveTtl(hours));
    }
    if hours > MAX_TOKEN_TTL_HOURS {
      return Err(ConfigError::TtlTooLarge(hours));
    }
    Duration::try_hours(hours).ok_or(ConfigError::TtlTooLarge(hours))
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Assembly ─────────────────────────────────────────────────────────────────

/// Fresh, empty application state for `config`.
pub fn build_state(config: &ServerConfig) -> Result<AppState, ConfigError> {
  config.validate()?;
  let tokens =
    TokenIssuer::new(config.jwt_secret.as_bytes(), config.token_ttl()?);
  Ok(AppState::new(IdentityStore::new(tokens)))
}

/// The API router wrapped in an HTTP trace layer.
pub fn app(state: AppState) -> Router {
  api_router(state).layer(TraceLayer::new_for_http())
}
