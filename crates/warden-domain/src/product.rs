//! Store products and the purchases made against them.
//!
//! Sellers list products and manage their own listings. Buyers (and plain
//! users) purchase one unit at a time; each purchase decrements stock and is
//! recorded in a separate [`Purchase`] table.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warden_core::{
  Action, Entry, Error, Grant, Principal, Record, ResourceTable, Result, Role,
  policy::authorize,
};

use crate::validate::required;

// ─── Product ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  pub name:        String,
  pub description: String,
  /// Unit price in the smallest currency unit.
  pub price_cents: u64,
  /// Units in stock.
  pub quantity:    u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductDraft {
  pub name:        String,
  #[serde(default)]
  pub description: String,
  pub price_cents: u64,
  pub quantity:    u32,
}

impl Record for Product {
  type Draft = ProductDraft;

  const KIND: &'static str = "product";

  fn policy(role: Role, _action: Action) -> Grant {
    match role {
      Role::Admin => Grant::Any,
      Role::Seller => Grant::Owned,
      Role::User | Role::Buyer => Grant::Deny,
    }
  }

  fn validate(draft: &ProductDraft) -> Result<()> { required("name", &draft.name) }

  fn from_draft(draft: ProductDraft) -> Self {
    Self {
      name:        draft.name,
      description: draft.description,
      price_cents: draft.price_cents,
      quantity:    draft.quantity,
    }
  }

  fn revise(&mut self, draft: ProductDraft) { *self = Self::from_draft(draft); }
}

// ─── Purchase ────────────────────────────────────────────────────────────────

/// A completed purchase. The owner is the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
  pub product_id:       Uuid,
  pub quantity:         u32,
  pub unit_price_cents: u64,
}

impl Record for Purchase {
  type Draft = Purchase;

  const KIND: &'static str = "purchase";

  fn policy(role: Role, action: Action) -> Grant {
    match (role, action) {
      (Role::Admin | Role::User | Role::Buyer, Action::Create) => Grant::Owned,
      (Role::Seller, Action::Create) => Grant::Deny,
      // Purchases are a ledger: never edited, only an admin may void one.
      (_, Action::Update) => Grant::Deny,
      (Role::Admin, Action::Delete) => Grant::Any,
      (Role::User | Role::Seller | Role::Buyer, Action::Delete) => Grant::Deny,
    }
  }

  fn from_draft(draft: Purchase) -> Self { draft }

  fn revise(&mut self, draft: Purchase) { *self = draft; }
}

pub fn take_one(entry: &mut Entry<Product>) -> Result<()> {
  if entry.record.quantity == 0 {
    return Err(Error::conflict("product out of stock"));
  }
  entry.record.quantity -= 1;
  Ok(())
}

/// Buy one unit of product `id` on behalf of `who`.
///
/// The stock decrement and the purchase insert lock different tables and are
/// not one transaction; authorization is checked before either happens.
pub async fn purchase(
  products: &ResourceTable<Product>,
  purchases: &ResourceTable<Purchase>,
  id: Uuid,
  who: &Principal,
) -> Result<Entry<Purchase>> {
  authorize(
    Purchase::policy(who.role, Action::Create),
    who,
    Action::Create,
    Purchase::KIND,
    None,
  )?;

  let product = products.modify(id, take_one).await?;
  purchases
    .create(
      Purchase {
        product_id:       product.id,
        quantity:         1,
        unit_price_cents: product.record.price_cents,
      },
      who,
    )
    .await
}

/// The requester's purchase history.
pub async fn orders_of(
  purchases: &ResourceTable<Purchase>,
  who: &Principal,
) -> Vec<Entry<Purchase>> {
  purchases.list_where(|e| e.is_owned_by(&who.username)).await
}
