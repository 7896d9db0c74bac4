//! The [`Record`] trait implemented by every stored resource type, and the
//! [`Entry`] envelope the table wraps records in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Result,
  policy::{Action, Grant},
  role::Role,
};

/// A resource type that can live in a [`ResourceTable`](crate::table::ResourceTable).
///
/// `Draft` is the set of caller-writable fields. Creation builds a record from
/// a draft; update replaces every draft field and leaves lifecycle state (a
/// book's current loan, an event's bookings) alone.
pub trait Record: Clone + Send + Sync + 'static {
  type Draft: Send + 'static;

  /// Singular noun used in error messages and logs, e.g. `"blog"`.
  const KIND: &'static str;

  /// Who may perform `action` on this type. Implementations should match on
  /// `role` exhaustively so that adding a role forces a decision here.
  fn policy(role: Role, action: Action) -> Grant;

  /// Reject malformed drafts before they reach the table.
  fn validate(_draft: &Self::Draft) -> Result<()> { Ok(()) }

  fn from_draft(draft: Self::Draft) -> Self;

  fn revise(&mut self, draft: Self::Draft);
}

/// A stored record together with its table-managed identity and ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
  pub id:         Uuid,
  /// Username of the account that created the record.
  pub owner:      String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  #[serde(flatten)]
  pub record:     T,
}

impl<T> Entry<T> {
  pub fn is_owned_by(&self, username: &str) -> bool { self.owner == username }
}
