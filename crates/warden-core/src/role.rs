//! Roles and the authenticated principal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of roles an account can hold.
///
/// Which role may do what is decided per record type by
/// [`Record::policy`](crate::record::Record::policy).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Admin,
  #[default]
  User,
  Seller,
  Buyer,
}

impl Role {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Admin => "admin",
      Self::User => "user",
      Self::Seller => "seller",
      Self::Buyer => "buyer",
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// The identity a request acts as, taken from verified token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
  pub username: String,
  pub role:     Role,
}

impl Principal {
  pub fn new(username: impl Into<String>, role: Role) -> Self {
    Self { username: username.into(), role }
  }
}
