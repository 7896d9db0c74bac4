//! Core types for Warden: accounts, bearer tokens, roles, and the generic
//! in-memory [`ResourceTable`](table::ResourceTable).
//!
//! This crate is free of HTTP dependencies. The api crate maps its errors to
//! status codes; everything else here is plain data plus two lock-owning
//! stores.

pub mod account;
pub mod error;
pub mod identity;
pub mod policy;
pub mod record;
pub mod role;
pub mod table;
pub mod token;

pub use error::{Error, Result};
pub use identity::IdentityStore;
pub use policy::{Action, Grant};
pub use record::{Entry, Record};
pub use role::{Principal, Role};
pub use table::ResourceTable;
pub use token::{Claims, IssuedToken, TokenIssuer};

#[cfg(test)]
mod tests;
