//! [`ResourceTable`] — a generic in-memory map of [`Entry`] records behind a
//! single table-wide lock.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::{
  Error, Result,
  policy::{Action, authorize},
  record::{Entry, Record},
  role::Principal,
};

/// An id-keyed table of `T` records with owner/role checks on every write.
///
/// Every operation, reads included, holds the one mutex for its whole
/// duration, so no caller ever observes a half-applied change.
pub struct ResourceTable<T: Record> {
  entries: Mutex<HashMap<Uuid, Entry<T>>>,
}

impl<T: Record> Default for ResourceTable<T> {
  fn default() -> Self { Self::new() }
}

impl<T: Record> ResourceTable<T> {
  pub fn new() -> Self {
    Self { entries: Mutex::new(HashMap::new()) }
  }

  /// Insert a new record owned by `requester`.
  pub async fn create(
    &self,
    draft: T::Draft,
    requester: &Principal,
  ) -> Result<Entry<T>> {
    authorize(
      T::policy(requester.role, Action::Create),
      requester,
      Action::Create,
      T::KIND,
      None,
    )?;
    T::validate(&draft)?;

    let now = Utc::now();
    let mut entries = self.entries.lock().await;
    let mut id = Uuid::new_v4();
    while entries.contains_key(&id) {
      id = Uuid::new_v4();
    }
    let entry = Entry {
      id,
      owner: requester.username.clone(),
      created_at: now,
      updated_at: now,
      record: T::from_draft(draft),
    };
    entries.insert(id, entry.clone());

    debug!(kind = T::KIND, %id, owner = %entry.owner, "created");
    Ok(entry)
  }

  pub async fn get(&self, id: Uuid) -> Result<Entry<T>> {
    self
      .entries
      .lock()
      .await
      .get(&id)
      .cloned()
      .ok_or(Error::NotFound { kind: T::KIND, id })
  }

  /// Snapshot of every record, oldest first.
  pub async fn list(&self) -> Vec<Entry<T>> { self.list_where(|_| true).await }

  /// Snapshot of the records matching `filter`, oldest first.
  pub async fn list_where<F>(&self, filter: F) -> Vec<Entry<T>>
  where
    F: Fn(&Entry<T>) -> bool,
  {
    let mut out: Vec<Entry<T>> = self
      .entries
      .lock()
      .await
      .values()
      .filter(|e| filter(e))
      .cloned()
      .collect();
    out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    out
  }

  /// Replace the draft fields of record `id`. Requires ownership or an
  /// override grant for [`Action::Update`]; the draft is validated only once
  /// the record exists and the requester may touch it.
  pub async fn update(
    &self,
    id: Uuid,
    draft: T::Draft,
    requester: &Principal,
  ) -> Result<Entry<T>> {
    let mut entries = self.entries.lock().await;
    let entry = entries
      .get_mut(&id)
      .ok_or(Error::NotFound { kind: T::KIND, id })?;
    authorize(
      T::policy(requester.role, Action::Update),
      requester,
      Action::Update,
      T::KIND,
      Some(&entry.owner),
    )?;
    T::validate(&draft)?;

    entry.record.revise(draft);
    entry.updated_at = Utc::now();

    debug!(kind = T::KIND, %id, by = %requester.username, "updated");
    Ok(entry.clone())
  }

  /// Remove record `id`. Same authorization rule as [`Self::update`].
  pub async fn delete(&self, id: Uuid, requester: &Principal) -> Result<()> {
    let mut entries = self.entries.lock().await;
    let entry = entries
      .get(&id)
      .ok_or(Error::NotFound { kind: T::KIND, id })?;
    authorize(
      T::policy(requester.role, Action::Delete),
      requester,
      Action::Delete,
      T::KIND,
      Some(&entry.owner),
    )?;

    entries.remove(&id);
    debug!(kind = T::KIND, %id, by = %requester.username, "deleted");
    Ok(())
  }

  /// Read-modify-write of record `id` for domain transitions.
  ///
  /// `f` works on a copy; the copy replaces the stored record only when `f`
  /// returns `Ok`. Authorization is up to `f`.
  pub async fn modify<F>(&self, id: Uuid, f: F) -> Result<Entry<T>>
  where
    F: FnOnce(&mut Entry<T>) -> Result<()>,
  {
    let mut entries = self.entries.lock().await;
    let stored = entries
      .get_mut(&id)
      .ok_or(Error::NotFound { kind: T::KIND, id })?;

    let mut working = stored.clone();
    f(&mut working)?;
    working.id = stored.id;
    working.owner.clone_from(&stored.owner);
    working.updated_at = Utc::now();
    *stored = working;

    debug!(kind = T::KIND, %id, "modified");
    Ok(stored.clone())
  }

  pub async fn len(&self) -> usize { self.entries.lock().await.len() }

  pub async fn is_empty(&self) -> bool { self.entries.lock().await.is_empty() }
}
