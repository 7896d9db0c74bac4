//! Table tests against a minimal note-like record.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Action, Entry, Error, Grant, Principal, Record, ResourceTable, Result, Role,
};

#[derive(Debug, Clone, PartialEq)]
struct Note {
  text:   String,
  pinned: bool,
}

impl Record for Note {
  type Draft = String;

  const KIND: &'static str = "note";

  fn policy(role: Role, action: Action) -> Grant {
    match (role, action) {
      (Role::Admin, _) => Grant::Any,
      (Role::User, _) => Grant::Owned,
      (Role::Seller | Role::Buyer, Action::Create) => Grant::Deny,
      (Role::Seller | Role::Buyer, Action::Update | Action::Delete) => {
        Grant::Owned
      }
    }
  }

  fn validate(draft: &String) -> Result<()> {
    if draft.is_empty() {
      return Err(Error::validation("text must not be empty"));
    }
    Ok(())
  }

  fn from_draft(text: String) -> Self { Self { text, pinned: false } }

  fn revise(&mut self, text: String) { self.text = text; }
}

fn alice() -> Principal { Principal::new("alice", Role::User) }
fn bob() -> Principal { Principal::new("bob", Role::Admin) }
fn carol() -> Principal { Principal::new("carol", Role::User) }

async fn note(table: &ResourceTable<Note>, by: &Principal) -> Entry<Note> {
  table.create("hello".into(), by).await.unwrap()
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_sets_owner_and_get_returns_it() {
  let table = ResourceTable::<Note>::new();
  let created = note(&table, &alice()).await;
  assert_eq!(created.owner, "alice");
  assert_eq!(created.created_at, created.updated_at);

  let fetched = table.get(created.id).await.unwrap();
  assert_eq!(fetched, created);
  assert_eq!(fetched.record.text, "hello");
}

#[tokio::test]
async fn create_by_denied_role_is_forbidden() {
  let table = ResourceTable::<Note>::new();
  let seller = Principal::new("sam", Role::Seller);
  let err = table.create("hi".into(), &seller).await.unwrap_err();
  assert!(matches!(err, Error::Forbidden(_)));
  assert!(table.is_empty().await);
}

#[tokio::test]
async fn create_rejects_invalid_draft() {
  let table = ResourceTable::<Note>::new();
  let err = table.create(String::new(), &alice()).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn get_missing_is_not_found() {
  let table = ResourceTable::<Note>::new();
  let id = Uuid::new_v4();
  let err = table.get(id).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: "note", id: missing } if missing == id));
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_is_a_snapshot_in_creation_order() {
  let table = ResourceTable::<Note>::new();
  let first = note(&table, &alice()).await;
  let second = note(&table, &carol()).await;

  let all = table.list().await;
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].id, first.id);
  assert_eq!(all[1].id, second.id);

  let mine = table.list_where(|e| e.is_owned_by("carol")).await;
  assert_eq!(mine.len(), 1);
  assert_eq!(mine[0].id, second.id);
}

// ─── Update / delete authorization ───────────────────────────────────────────

#[tokio::test]
async fn owner_can_update_and_keeps_identity() {
  let table = ResourceTable::<Note>::new();
  let created = note(&table, &alice()).await;

  let updated = table
    .update(created.id, "edited".into(), &alice())
    .await
    .unwrap();
  assert_eq!(updated.id, created.id);
  assert_eq!(updated.owner, "alice");
  assert_eq!(updated.record.text, "edited");
  assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn non_owner_update_and_delete_are_forbidden() {
  let table = ResourceTable::<Note>::new();
  let created = note(&table, &alice()).await;

  assert!(matches!(
    table.update(created.id, "nope".into(), &carol()).await,
    Err(Error::Forbidden(_))
  ));
  assert!(matches!(
    table.delete(created.id, &carol()).await,
    Err(Error::Forbidden(_))
  ));
  assert_eq!(table.get(created.id).await.unwrap().record.text, "hello");
}

#[tokio::test]
async fn update_missing_is_not_found() {
  let table = ResourceTable::<Note>::new();
  assert!(matches!(
    table.update(Uuid::new_v4(), "x".into(), &bob()).await,
    Err(Error::NotFound { .. })
  ));
  assert!(matches!(
    table.delete(Uuid::new_v4(), &bob()).await,
    Err(Error::NotFound { .. })
  ));
}

#[tokio::test]
async fn non_owner_with_invalid_draft_is_forbidden() {
  let table = ResourceTable::<Note>::new();
  let created = note(&table, &alice()).await;
  assert!(matches!(
    table.update(created.id, String::new(), &carol()).await,
    Err(Error::Forbidden(_))
  ));
}

#[tokio::test]
async fn invalid_draft_for_missing_id_is_not_found() {
  let table = ResourceTable::<Note>::new();
  assert!(matches!(
    table.update(Uuid::new_v4(), String::new(), &alice()).await,
    Err(Error::NotFound { .. })
  ));
}

#[tokio::test]
async fn owner_with_invalid_draft_is_rejected() {
  let table = ResourceTable::<Note>::new();
  let created = note(&table, &alice()).await;
  assert!(matches!(
    table.update(created.id, String::new(), &alice()).await,
    Err(Error::Validation(_))
  ));
  assert_eq!(table.get(created.id).await.unwrap().record.text, "hello");
}

#[tokio::test]
async fn admin_override_then_owner_delete() {
  let table = ResourceTable::<Note>::new();
  let r = note(&table, &alice()).await;

  let by_bob = table.update(r.id, "bob was here".into(), &bob()).await.unwrap();
  assert_eq!(by_bob.owner, "alice");

  assert!(matches!(
    table.update(r.id, "carol".into(), &carol()).await,
    Err(Error::Forbidden(_))
  ));

  table.delete(r.id, &alice()).await.unwrap();
  assert!(matches!(table.get(r.id).await, Err(Error::NotFound { .. })));
}

// ─── Modify ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn modify_commits_on_success() {
  let table = ResourceTable::<Note>::new();
  let r = note(&table, &alice()).await;

  let pinned = table
    .modify(r.id, |e| {
      e.record.pinned = true;
      Ok(())
    })
    .await
    .unwrap();
  assert!(pinned.record.pinned);
  assert!(table.get(r.id).await.unwrap().record.pinned);
}

#[tokio::test]
async fn modify_failure_leaves_record_untouched() {
  let table = ResourceTable::<Note>::new();
  let r = note(&table, &alice()).await;

  let err = table
    .modify(r.id, |e| {
      e.record.text = "half-written".into();
      e.owner = "mallory".into();
      Err(Error::conflict("refused"))
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Conflict(m) if m == "refused"));
  assert_eq!(table.get(r.id).await.unwrap(), r);
}

#[tokio::test]
async fn modify_cannot_change_owner() {
  let table = ResourceTable::<Note>::new();
  let r = note(&table, &alice()).await;
  let after = table
    .modify(r.id, |e| {
      e.owner = "mallory".into();
      Ok(())
    })
    .await
    .unwrap();
  assert_eq!(after.owner, "alice");
}

// ─── Concurrency ─────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_creates_yield_distinct_ids() {
  const N: usize = 200;
  let table = Arc::new(ResourceTable::<Note>::new());

  let handles: Vec<_> = (0..N)
    .map(|i| {
      let table = table.clone();
      tokio::spawn(async move {
        let who = Principal::new(format!("user{i}"), Role::User);
        table.create(format!("note {i}"), &who).await.unwrap().id
      })
    })
    .collect();

  let mut ids = std::collections::HashSet::new();
  for h in handles {
    ids.insert(h.await.unwrap());
  }
  assert_eq!(ids.len(), N);
  assert_eq!(table.len().await, N);
}
