//! Events. Admins schedule them; any account may book a seat once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warden_core::{
  Action, Entry, Error, Grant, Principal, Record, ResourceTable, Result, Role,
};

use crate::validate::required;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub name:        String,
  pub description: String,
  pub location:    String,
  pub starts_at:   Option<DateTime<Utc>>,
  /// Usernames holding a booking, in booking order.
  pub booked_by:   Vec<String>,
}

impl Event {
  pub fn is_booked_by(&self, username: &str) -> bool {
    self.booked_by.iter().any(|u| u == username)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDraft {
  pub name:        String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub location:    String,
  pub starts_at:   Option<DateTime<Utc>>,
}

impl Record for Event {
  type Draft = EventDraft;

  const KIND: &'static str = "event";

  fn policy(role: Role, _action: Action) -> Grant {
    match role {
      Role::Admin => Grant::Any,
      Role::User | Role::Seller | Role::Buyer => Grant::Deny,
    }
  }

  fn validate(draft: &EventDraft) -> Result<()> { required("name", &draft.name) }

  fn from_draft(draft: EventDraft) -> Self {
    Self {
      name:        draft.name,
      description: draft.description,
      location:    draft.location,
      starts_at:   draft.starts_at,
      booked_by:   Vec::new(),
    }
  }

  fn revise(&mut self, draft: EventDraft) {
    self.name = draft.name;
    self.description = draft.description;
    self.location = draft.location;
    self.starts_at = draft.starts_at;
  }
}

pub fn reserve(entry: &mut Entry<Event>, who: &Principal) -> Result<()> {
  if entry.record.is_booked_by(&who.username) {
    return Err(Error::conflict("user already booked this event"));
  }
  entry.record.booked_by.push(who.username.clone());
  Ok(())
}

pub async fn book(
  events: &ResourceTable<Event>,
  id: Uuid,
  who: &Principal,
) -> Result<Entry<Event>> {
  events.modify(id, |e| reserve(e, who)).await
}

/// Events the requester holds a booking for.
pub async fn bookings_of(
  events: &ResourceTable<Event>,
  who: &Principal,
) -> Vec<Entry<Event>> {
  events
    .list_where(|e| e.record.is_booked_by(&who.username))
    .await
}
