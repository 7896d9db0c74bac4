//! [`IdentityStore`] — registration, password authentication, and bearer
//! token verification.

use std::collections::HashMap;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use chrono::Utc;
use rand_core::OsRng;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::{
  Error, Result,
  account::Account,
  role::Role,
  token::{Claims, IssuedToken, TokenIssuer},
};

struct Credential {
  account:       Account,
  /// argon2 PHC string.
  password_hash: String,
}

/// The set of registered accounts plus the token issuer that vouches for them.
///
/// Accounts are keyed by username and are never removed.
pub struct IdentityStore {
  accounts: RwLock<HashMap<String, Credential>>,
  tokens:   TokenIssuer,
}

impl IdentityStore {
  pub fn new(tokens: TokenIssuer) -> Self {
    Self { accounts: RwLock::new(HashMap::new()), tokens }
  }

  pub fn tokens(&self) -> &TokenIssuer { &self.tokens }

  /// Register a new account.
  ///
  /// Fails with [`Error::DuplicateUser`] if `username` is taken.
  #[instrument(skip(self, password))]
  pub async fn register(
    &self,
    username: &str,
    password: &str,
    role: Role,
  ) -> Result<Account> {
    if username.trim().is_empty() {
      return Err(Error::validation("username must not be empty"));
    }
    if password.is_empty() {
      return Err(Error::validation("password must not be empty"));
    }

    let password_hash = hash_password(password)?;
    let account = Account {
      username: username.to_owned(),
      role,
      created_at: Utc::now(),
    };

    let mut accounts = self.accounts.write().await;
    if accounts.contains_key(username) {
      debug!("username already registered");
      return Err(Error::DuplicateUser(username.to_owned()));
    }
    accounts.insert(username.to_owned(), Credential {
      account: account.clone(),
      password_hash,
    });
    drop(accounts);

    info!(username = %account.username, role = %account.role, "account_registered");
    Ok(account)
  }

  /// Check a username/password pair and mint a token for it.
  #[instrument(skip(self, password))]
  pub async fn authenticate(
    &self,
    username: &str,
    password: &str,
  ) -> Result<IssuedToken> {
    let (account, password_hash) = {
      let accounts = self.accounts.read().await;
      let credential = accounts.get(username).ok_or(Error::InvalidCredentials)?;
      (credential.account.clone(), credential.password_hash.clone())
    };

    let parsed = PasswordHash::new(&password_hash)
      .map_err(|e| Error::PasswordHash(e.to_string()))?;
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .map_err(|_| Error::InvalidCredentials)?;

    self.tokens.issue(&account)
  }

  /// Verify a bearer token's signature and expiry.
  pub fn verify_token(&self, token: &str) -> Result<Claims> {
    self.tokens.verify(token)
  }

  pub async fn account(&self, username: &str) -> Option<Account> {
    self
      .accounts
      .read()
      .await
      .get(username)
      .map(|c| c.account.clone())
  }

  pub async fn contains(&self, username: &str) -> bool {
    self.accounts.read().await.contains_key(username)
  }
}

fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| Error::PasswordHash(e.to_string()))?
      .to_string(),
  )
}
