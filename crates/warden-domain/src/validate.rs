use warden_core::{Error, Result};

/// Reject empty or whitespace-only required text fields.
pub(crate) fn required(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::validation(format!("{field} must not be empty")));
  }
  Ok(())
}
