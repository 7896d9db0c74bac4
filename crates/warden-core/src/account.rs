//! Accounts — the registered identities behind bearer tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::{Principal, Role};

/// A registered account as exposed to callers. The credential is held
/// separately by the [`IdentityStore`](crate::identity::IdentityStore) and
/// never leaves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
  pub username:   String,
  pub role:       Role,
  pub created_at: DateTime<Utc>,
}

impl Account {
  pub fn principal(&self) -> Principal {
    Principal::new(self.username.clone(), self.role)
  }
}
