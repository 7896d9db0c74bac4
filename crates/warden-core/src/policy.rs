//! Per-record-type authorization.
//!
//! Each [`Record`](crate::record::Record) answers `policy(role, action)` with a
//! [`Grant`]; [`authorize`] turns that answer into `Ok(())` or
//! [`Error::Forbidden`].

use serde::{Deserialize, Serialize};

use crate::{Error, Result, role::Principal};

/// A write operation on a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
  Create,
  Update,
  Delete,
}

impl Action {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Create => "create",
      Self::Update => "update",
      Self::Delete => "delete",
    }
  }
}

/// What a role is allowed to do for one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
  Deny,
  /// Only on records the principal owns. For [`Action::Create`] this simply
  /// means "allowed"; the creator becomes the owner.
  Owned,
  /// On any record, regardless of owner.
  Any,
}

/// Check `principal` against `grant` for a record owned by `owner`.
///
/// `owner` is `None` for creation, where there is no record yet.
pub fn authorize(
  grant: Grant,
  principal: &Principal,
  action: Action,
  kind: &str,
  owner: Option<&str>,
) -> Result<()> {
  match (grant, owner) {
    (Grant::Any, _) | (Grant::Owned, None) => Ok(()),
    (Grant::Owned, Some(owner)) if owner == principal.username => Ok(()),
    (Grant::Owned, Some(_)) => Err(Error::forbidden(format!(
      "only the owner may {} this {kind}",
      action.as_str()
    ))),
    (Grant::Deny, _) => Err(Error::forbidden(format!(
      "role {} may not {} a {kind}",
      principal.role,
      action.as_str()
    ))),
  }
}
