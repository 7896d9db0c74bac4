//! Library books. Admins manage the catalogue; any account may borrow a book
//! that is on the shelf and return a book it borrowed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warden_core::{
  Action, Entry, Error, Grant, Principal, Record, ResourceTable, Result, Role,
};

use crate::validate::required;

/// How long a borrower may keep a book.
pub const LOAN_PERIOD_DAYS: i64 = 14;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLoan {
  pub borrower:    String,
  pub borrowed_at: DateTime<Utc>,
  pub due_at:      DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
  pub title:  String,
  pub author: String,
  pub isbn:   Option<String>,
  /// `Some` while the book is checked out.
  pub loan:   Option<BookLoan>,
}

impl Book {
  pub fn is_borrowed(&self) -> bool { self.loan.is_some() }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookDraft {
  pub title:  String,
  pub author: String,
  pub isbn:   Option<String>,
}

impl Record for Book {
  type Draft = BookDraft;

  const KIND: &'static str = "book";

  fn policy(role: Role, _action: Action) -> Grant {
    match role {
      Role::Admin => Grant::Any,
      Role::User | Role::Seller | Role::Buyer => Grant::Deny,
    }
  }

  fn validate(draft: &BookDraft) -> Result<()> {
    required("title", &draft.title)?;
    required("author", &draft.author)
  }

  fn from_draft(draft: BookDraft) -> Self {
    Self {
      title:  draft.title,
      author: draft.author,
      isbn:   draft.isbn,
      loan:   None,
    }
  }

  fn revise(&mut self, draft: BookDraft) {
    self.title = draft.title;
    self.author = draft.author;
    self.isbn = draft.isbn;
  }
}

/// Check a book out to `who`, due back after [`LOAN_PERIOD_DAYS`].
pub fn lend(entry: &mut Entry<Book>, who: &Principal, now: DateTime<Utc>) -> Result<()> {
  if entry.record.is_borrowed() {
    return Err(Error::conflict("book is already borrowed"));
  }
  entry.record.loan = Some(BookLoan {
    borrower:    who.username.clone(),
    borrowed_at: now,
    due_at:      now + Duration::days(LOAN_PERIOD_DAYS),
  });
  Ok(())
}

/// Take a book back from `who`. Only the current borrower may return it.
pub fn take_back(entry: &mut Entry<Book>, who: &Principal) -> Result<()> {
  match &entry.record.loan {
    Some(loan) if loan.borrower == who.username => {
      entry.record.loan = None;
      Ok(())
    }
    _ => Err(Error::conflict("book is not borrowed by this user")),
  }
}

pub async fn borrow(
  books: &ResourceTable<Book>,
  id: Uuid,
  who: &Principal,
) -> Result<Entry<Book>> {
  let now = Utc::now();
  books.modify(id, |e| lend(e, who, now)).await
}

pub async fn give_back(
  books: &ResourceTable<Book>,
  id: Uuid,
  who: &Principal,
) -> Result<Entry<Book>> {
  books.modify(id, |e| take_back(e, who)).await
}

#[cfg(test)]
mod tests {
  use super::*;

  fn admin() -> Principal { Principal::new("root", Role::Admin) }
  fn reader(name: &str) -> Principal { Principal::new(name, Role::User) }

  async fn shelved(books: &ResourceTable<Book>) -> Entry<Book> {
    books
      .create(
        BookDraft {
          title:  "Dune".into(),
          author: "Frank Herbert".into(),
          isbn:   None,
        },
        &admin(),
      )
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn only_admins_manage_the_catalogue() {
    let books = ResourceTable::<Book>::new();
    let draft = BookDraft { title: "x".into(), author: "y".into(), isbn: None };
    assert!(matches!(
      books.create(draft, &reader("alice")).await,
      Err(Error::Forbidden(_))
    ));
  }

  #[tokio::test]
  async fn borrow_sets_fourteen_day_loan() {
    let books = ResourceTable::<Book>::new();
    let book = shelved(&books).await;

    let out = borrow(&books, book.id, &reader("alice")).await.unwrap();
    let loan = out.record.loan.unwrap();
    assert_eq!(loan.borrower, "alice");
    assert_eq!(loan.due_at - loan.borrowed_at, Duration::days(14));
  }

  #[tokio::test]
  async fn second_borrow_conflicts() {
    let books = ResourceTable::<Book>::new();
    let book = shelved(&books).await;
    borrow(&books, book.id, &reader("alice")).await.unwrap();

    let err = borrow(&books, book.id, &reader("carol")).await.unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    let stored = books.get(book.id).await.unwrap();
    assert_eq!(stored.record.loan.unwrap().borrower, "alice");
  }

  #[tokio::test]
  async fn only_the_borrower_can_return() {
    let books = ResourceTable::<Book>::new();
    let book = shelved(&books).await;
    borrow(&books, book.id, &reader("alice")).await.unwrap();

    assert!(matches!(
      give_back(&books, book.id, &reader("carol")).await,
      Err(Error::Conflict(_))
    ));
    let returned = give_back(&books, book.id, &reader("alice")).await.unwrap();
    assert!(!returned.record.is_borrowed());

    // Returning a book that is on the shelf is also refused.
    assert!(matches!(
      give_back(&books, book.id, &reader("alice")).await,
      Err(Error::Conflict(_))
    ));
  }

  #[tokio::test]
  async fn catalogue_update_keeps_the_loan() {
    let books = ResourceTable::<Book>::new();
    let book = shelved(&books).await;
    borrow(&books, book.id, &reader("alice")).await.unwrap();

    let draft = BookDraft {
      title:  "Dune Messiah".into(),
      author: "Frank Herbert".into(),
      isbn:   Some("978-0593098233".into()),
    };
    let updated = books.update(book.id, draft, &admin()).await.unwrap();
    assert_eq!(updated.record.title, "Dune Messiah");
    assert!(updated.record.is_borrowed());
  }

  #[tokio::test]
  async fn borrow_missing_book_is_not_found() {
    let books = ResourceTable::<Book>::new();
    assert!(matches!(
      borrow(&books, Uuid::new_v4(), &reader("alice")).await,
      Err(Error::NotFound { kind: "book", .. })
    ));
  }
}
