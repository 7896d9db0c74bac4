//! Bearer tokens: HS256-signed JWTs carrying a username and a role.
//!
//! Tokens are stateless. A token is valid while its signature checks out and
//! the current time is before `exp`; there is no refresh and no revocation.

use chrono::{DateTime, Duration, TimeZone as _, Utc};
use jsonwebtoken::{
  Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  account::Account,
  role::{Principal, Role},
};

/// Validity window, in hours, applied when no other is configured.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 72;

/// The claim set embedded in every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  pub username: String,
  pub role:     Role,
  /// Issued-at, seconds since the Unix epoch.
  pub iat:      i64,
  /// Expiry, seconds since the Unix epoch.
  pub exp:      i64,
}

impl Claims {
  pub fn principal(&self) -> Principal {
    Principal::new(self.username.clone(), self.role)
  }

  pub fn expires_at(&self) -> DateTime<Utc> {
    Utc.timestamp_opt(self.exp, 0).single().unwrap_or(DateTime::<Utc>::MAX_UTC)
  }
}

/// A freshly minted token, as returned from login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
  pub token:      String,
  pub expires_at: DateTime<Utc>,
}

/// Signs and verifies tokens with one symmetric secret.
#[derive(Clone)]
pub struct TokenIssuer {
  encoding:   EncodingKey,
  decoding:   DecodingKey,
  validation: Validation,
  ttl:        Duration,
}

impl TokenIssuer {
  pub fn new(secret: &[u8], ttl: Duration) -> Self {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked against an explicit clock in `verify_at`.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    Self {
      encoding: EncodingKey::from_secret(secret),
      decoding: DecodingKey::from_secret(secret),
      validation,
      ttl,
    }
  }

  pub fn ttl(&self) -> Duration { self.ttl }

  pub fn issue(&self, account: &Account) -> Result<IssuedToken> {
    self.issue_at(account, Utc::now())
  }

  /// Mint a token as if the current time were `now`.
  pub fn issue_at(
    &self,
    account: &Account,
    now: DateTime<Utc>,
  ) -> Result<IssuedToken> {
    let expires_at = now
      .checked_add_signed(self.ttl)
      .ok_or(Error::ExpiryOutOfRange)?;
    let claims = Claims {
      username: account.username.clone(),
      role:     account.role,
      iat:      now.timestamp(),
      exp:      expires_at.timestamp(),
    };
    let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
      .map_err(Error::TokenSigning)?;
    Ok(IssuedToken { token, expires_at })
  }

  pub fn verify(&self, token: &str) -> Result<Claims> {
    self.verify_at(token, Utc::now())
  }

  /// Verify `token` as if the current time were `now`. Fails once
  /// `now >= exp`.
  pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
    let data = decode::<Claims>(token, &self.decoding, &self.validation)
      .map_err(|_| Error::InvalidToken)?;
    if now.timestamp() >= data.claims.exp {
      return Err(Error::InvalidToken);
    }
    Ok(data.claims)
  }
}
