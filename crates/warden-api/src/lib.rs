//! JSON REST API for Warden.
//!
//! Exposes an axum [`Router`] over an [`AppState`] holding the identity store
//! and one [`ResourceTable`] per resource type. Every route except
//! `/register`, `/login` and `/health` requires a bearer token.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = warden_api::api_router(AppState::new(identity));
//! ```

pub mod auth;
pub mod bookings;
pub mod careers;
pub mod error;
pub mod extract;
pub mod library;
pub mod resources;
pub mod shop;
pub mod tasks;

use std::sync::Arc;

use axum::{
  Json, Router,
  extract::FromRef,
  routing::{delete, get, post},
};
use serde_json::{Value, json};
use warden_core::{IdentityStore, ResourceTable};
use warden_domain::{
  Application, Blog, Book, Event, Job, Product, Purchase, Task,
};

pub use error::ApiError;
pub use extract::Authenticated;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers. Each field is also extractable
/// on its own via [`FromRef`].
#[derive(Clone, FromRef)]
pub struct AppState {
  pub identity:     Arc<IdentityStore>,
  pub blogs:        Arc<ResourceTable<Blog>>,
  pub tasks:        Arc<ResourceTable<Task>>,
  pub books:        Arc<ResourceTable<Book>>,
  pub events:       Arc<ResourceTable<Event>>,
  pub products:     Arc<ResourceTable<Product>>,
  pub purchases:    Arc<ResourceTable<Purchase>>,
  pub jobs:         Arc<ResourceTable<Job>>,
  pub applications: Arc<ResourceTable<Application>>,
}

impl AppState {
  /// Empty tables around `identity`.
  pub fn new(identity: IdentityStore) -> Self {
    Self {
      identity:     Arc::new(identity),
      blogs:        Arc::default(),
      tasks:        Arc::default(),
      books:        Arc::default(),
      events:       Arc::default(),
      products:     Arc::default(),
      purchases:    Arc::default(),
      jobs:         Arc::default(),
      applications: Arc::default(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full API router for `state`.
pub fn api_router(state: AppState) -> Router<()> {
  use resources::{create, get_one, list, update};

  Router::new()
    .route("/health", get(health))
    // Identity
    .route("/register", post(auth::register))
    .route("/login", post(auth::login))
    // Blogs
    .route("/blogs", get(list::<Blog>).post(create::<Blog>))
    .route(
      "/blogs/{id}",
      get(get_one::<Blog>)
        .put(update::<Blog>)
        .delete(resources::delete::<Blog>),
    )
    // Tasks
    .route("/tasks", get(tasks::mine).post(create::<Task>))
    .route(
      "/tasks/{id}",
      get(tasks::get_mine)
        .put(update::<Task>)
        .delete(resources::delete::<Task>),
    )
    // Library
    .route("/books", get(list::<Book>).post(create::<Book>))
    .route(
      "/books/{id}",
      get(get_one::<Book>)
        .put(update::<Book>)
        .delete(resources::delete::<Book>),
    )
    .route("/books/{id}/borrow", post(library::borrow))
    .route("/books/{id}/return", post(library::give_back))
    // Events
    .route("/events", get(list::<Event>).post(create::<Event>))
    .route(
      "/events/{id}",
      get(get_one::<Event>)
        .put(update::<Event>)
        .delete(resources::delete::<Event>),
    )
    .route("/events/{id}/book", post(bookings::book))
    .route("/bookings", get(bookings::mine))
    // Store
    .route("/products", get(list::<Product>).post(create::<Product>))
    .route(
      "/products/{id}",
      get(get_one::<Product>)
        .put(update::<Product>)
        .delete(resources::delete::<Product>),
    )
    .route("/products/{id}/purchase", post(shop::purchase))
    .route("/orders", get(shop::orders))
    .route("/orders/{id}", delete(resources::delete::<Purchase>))
    // Jobs
    .route("/jobs", get(list::<Job>).post(create::<Job>))
    .route(
      "/jobs/{id}",
      get(get_one::<Job>)
        .put(update::<Job>)
        .delete(resources::delete::<Job>),
    )
    .route("/jobs/{id}/apply", post(careers::apply))
    .route("/applications", get(careers::history))
    .with_state(state)
}

async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }
