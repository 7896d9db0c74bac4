//! Resource types served by Warden.
//!
//! Each module defines a [`Record`](warden_core::Record), its draft, its
//! authorization table, and any domain transitions (borrowing a book, booking
//! an event, purchasing a product, applying to a job) as functions over a
//! [`ResourceTable`](warden_core::ResourceTable).

pub mod blog;
pub mod book;
pub mod event;
pub mod job;
pub mod product;
pub mod task;

mod validate;

pub use blog::Blog;
pub use book::Book;
pub use event::Event;
pub use job::{Application, Job};
pub use product::{Product, Purchase};
pub use task::Task;
