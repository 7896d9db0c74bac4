//! Job postings and the applications made to them.
//!
//! Admins post and manage jobs. Any account may apply to a job once; the
//! application is recorded in a separate [`Application`] table and lists the
//! applicant on the job itself.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warden_core::{
  Action, Entry, Error, Grant, Principal, Record, ResourceTable, Result, Role,
  policy::authorize,
};

use crate::validate::required;

// ─── Job ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
  pub name:        String,
  pub position:    String,
  pub description: String,
  /// Usernames that applied, in application order.
  pub applicants:  Vec<String>,
}

impl Job {
  pub fn has_applicant(&self, username: &str) -> bool {
    self.applicants.iter().any(|u| u == username)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobDraft {
  pub name:        String,
  pub position:    String,
  #[serde(default)]
  pub description: String,
}

impl Record for Job {
  type Draft = JobDraft;

  const KIND: &'static str = "job";

  fn policy(role: Role, _action: Action) -> Grant {
    match role {
      Role::Admin => Grant::Any,
      Role::User | Role::Seller | Role::Buyer => Grant::Deny,
    }
  }

  fn validate(draft: &JobDraft) -> Result<()> {
    required("name", &draft.name)?;
    required("position", &draft.position)
  }

  fn from_draft(draft: JobDraft) -> Self {
    Self {
      name:        draft.name,
      position:    draft.position,
      description: draft.description,
      applicants:  Vec::new(),
    }
  }

  fn revise(&mut self, draft: JobDraft) {
    self.name = draft.name;
    self.position = draft.position;
    self.description = draft.description;
  }
}

// ─── Application ─────────────────────────────────────────────────────────────

/// An application to a job. The owner is the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
  pub job_id:   Uuid,
  /// The job's position at the time of applying.
  pub position: String,
}

impl Record for Application {
  type Draft = Application;

  const KIND: &'static str = "application";

  fn policy(_role: Role, action: Action) -> Grant {
    match action {
      Action::Create => Grant::Owned,
      Action::Update | Action::Delete => Grant::Deny,
    }
  }

  fn from_draft(draft: Application) -> Self { draft }

  fn revise(&mut self, draft: Application) { *self = draft; }
}

pub fn enlist(entry: &mut Entry<Job>, who: &Principal) -> Result<()> {
  if entry.record.has_applicant(&who.username) {
    return Err(Error::conflict("you have already applied for this job"));
  }
  entry.record.applicants.push(who.username.clone());
  Ok(())
}

/// Apply to job `id` on behalf of `who`.
///
/// The duplicate check runs under the job table's lock, so two concurrent
/// applications by one user cannot both succeed.
pub async fn apply(
  jobs: &ResourceTable<Job>,
  applications: &ResourceTable<Application>,
  id: Uuid,
  who: &Principal,
) -> Result<Entry<Application>> {
  authorize(
    Application::policy(who.role, Action::Create),
    who,
    Action::Create,
    Application::KIND,
    None,
  )?;

  let job = jobs.modify(id, |e| enlist(e, who)).await?;
  applications
    .create(
      Application {
        job_id:   job.id,
        position: job.record.position,
      },
      who,
    )
    .await
}

/// The requester's application history.
pub async fn applications_of(
  applications: &ResourceTable<Application>,
  who: &Principal,
) -> Vec<Entry<Application>> {
  applications
    .list_where(|e| e.is_owned_by(&who.username))
    .await
}

#[cfg(test)]
mod tests {
  use super::*;

  fn admin() -> Principal { Principal::new("root", Role::Admin) }
  fn alice() -> Principal { Principal::new("alice", Role::User) }

  async fn posted(jobs: &ResourceTable<Job>) -> Entry<Job> {
    jobs
      .create(
        JobDraft {
          name:        "Acme".into(),
          position:    "Backend engineer".into(),
          description: String::new(),
        },
        &admin(),
      )
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn second_application_conflicts() {
    let jobs = ResourceTable::<Job>::new();
    let applications = ResourceTable::<Application>::new();
    let job = posted(&jobs).await;

    let first = apply(&jobs, &applications, job.id, &alice()).await.unwrap();
    assert_eq!(first.owner, "alice");
    assert_eq!(first.record.job_id, job.id);
    assert_eq!(first.record.position, "Backend engineer");

    let err = apply(&jobs, &applications, job.id, &alice()).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(m) if m == "you have already applied for this job"));
    assert_eq!(applications.len().await, 1);
    assert_eq!(jobs.get(job.id).await.unwrap().record.applicants, vec!["alice"]);
  }

  #[tokio::test]
  async fn history_is_per_applicant() {
    let jobs = ResourceTable::<Job>::new();
    let applications = ResourceTable::<Application>::new();
    let job = posted(&jobs).await;
    let carol = Principal::new("carol", Role::Buyer);

    apply(&jobs, &applications, job.id, &alice()).await.unwrap();
    apply(&jobs, &applications, job.id, &carol).await.unwrap();

    let mine = applications_of(&applications, &alice()).await;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].owner, "alice");
    assert!(applications_of(&applications, &admin()).await.is_empty());
  }

  #[tokio::test]
  async fn applying_to_missing_job_records_nothing() {
    let jobs = ResourceTable::<Job>::new();
    let applications = ResourceTable::<Application>::new();
    assert!(matches!(
      apply(&jobs, &applications, Uuid::new_v4(), &alice()).await,
      Err(Error::NotFound { .. })
    ));
    assert!(applications.is_empty().await);
  }

  #[tokio::test]
  async fn only_admins_manage_postings() {
    let jobs = ResourceTable::<Job>::new();
    let job = posted(&jobs).await;
    let draft = JobDraft {
      name:        "Acme".into(),
      position:    "CTO".into(),
      description: String::new(),
    };
    assert!(matches!(
      jobs.create(draft.clone(), &alice()).await,
      Err(Error::Forbidden(_))
    ));
    assert!(matches!(
      jobs.update(job.id, draft.clone(), &alice()).await,
      Err(Error::Forbidden(_))
    ));
    let revised = jobs.update(job.id, draft, &admin()).await.unwrap();
    assert_eq!(revised.record.position, "CTO");
    jobs.delete(job.id, &admin()).await.unwrap();
  }
}
