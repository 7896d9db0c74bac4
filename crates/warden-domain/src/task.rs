//! Personal to-do items. Listing is scoped to the requester, and only the
//! owner (or an admin) may edit them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warden_core::{
  Action, Entry, Error, Grant, Principal, Record, ResourceTable, Result, Role,
};

use crate::validate::required;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
  #[default]
  Pending,
  InProgress,
  Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
  pub title:       String,
  pub description: String,
  pub status:      TaskStatus,
  pub due_date:    Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskDraft {
  pub title:       String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub status:      TaskStatus,
  pub due_date:    Option<DateTime<Utc>>,
}

impl Record for Task {
  type Draft = TaskDraft;

  const KIND: &'static str = "task";

  fn policy(role: Role, action: Action) -> Grant {
    match role {
      Role::Admin => match action {
        Action::Create => Grant::Owned,
        Action::Update | Action::Delete => Grant::Any,
      },
      Role::User | Role::Seller | Role::Buyer => Grant::Owned,
    }
  }

  fn validate(draft: &TaskDraft) -> Result<()> { required("title", &draft.title) }

  fn from_draft(draft: TaskDraft) -> Self {
    Self {
      title:       draft.title,
      description: draft.description,
      status:      draft.status,
      due_date:    draft.due_date,
    }
  }

  fn revise(&mut self, draft: TaskDraft) { *self = Self::from_draft(draft); }
}

/// The requester's own tasks.
pub async fn tasks_of(
  tasks: &ResourceTable<Task>,
  who: &Principal,
) -> Vec<Entry<Task>> {
  tasks.list_where(|e| e.is_owned_by(&who.username)).await
}

/// Task `id`, visible only to its owner or an admin.
pub async fn task_for(
  tasks: &ResourceTable<Task>,
  id: Uuid,
  who: &Principal,
) -> Result<Entry<Task>> {
  let entry = tasks.get(id).await?;
  if who.role != Role::Admin && !entry.is_owned_by(&who.username) {
    return Err(Error::forbidden("only the owner may view this task"));
  }
  Ok(entry)
}
