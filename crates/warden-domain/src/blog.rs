//! Blog posts. Anyone may write one; only the author or an admin may change
//! or remove it.

use serde::{Deserialize, Serialize};
use warden_core::{Action, Grant, Record, Result, Role};

use crate::validate::required;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
  pub title:   String,
  pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogDraft {
  pub title:   String,
  #[serde(default)]
  pub content: String,
}

impl Record for Blog {
  type Draft = BlogDraft;

  const KIND: &'static str = "blog";

  fn policy(role: Role, action: Action) -> Grant {
    match (role, action) {
      (_, Action::Create) => Grant::Owned,
      (Role::Admin, Action::Update | Action::Delete) => Grant::Any,
      (Role::User | Role::Seller | Role::Buyer, Action::Update | Action::Delete) => {
        Grant::Owned
      }
    }
  }

  fn validate(draft: &BlogDraft) -> Result<()> { required("title", &draft.title) }

  fn from_draft(draft: BlogDraft) -> Self {
    Self { title: draft.title, content: draft.content }
  }

  fn revise(&mut self, draft: BlogDraft) {
    self.title = draft.title;
    self.content = draft.content;
  }
}
