//! Email syntax validation.
//!
//! Every address that reaches the store goes through [`validate`] first; the
//! [`Email`] newtype is the proof that it did.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// RFC 5322-lite: permissive local part, `@`, then dot-separated hostname
/// labels of 1-63 characters that start and end alphanumeric.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
  )
  .expect("email regex is valid")
});

// ─── Email ───────────────────────────────────────────────────────────────────

/// A syntactically valid email address.
///
/// Addresses are compared exactly as written; no case folding is applied.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
  pub fn as_str(&self) -> &str { &self.0 }

  pub fn into_string(self) -> String { self.0 }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str { &self.0 }
}

impl TryFrom<String> for Email {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> {
    if is_valid(&s) {
      Ok(Self(s))
    } else {
      Err(Error::InvalidEmail(s))
    }
  }
}

impl From<Email> for String {
  fn from(e: Email) -> Self { e.0 }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// `true` if `s` is a non-blank string matching the address grammar.
pub fn is_valid(s: &str) -> bool {
  !s.trim().is_empty() && EMAIL_RE.is_match(s)
}

/// Validate a single address.
pub fn validate(s: &str) -> Result<Email> { Email::try_from(s.to_owned()) }

/// Validate a list of addresses, failing closed.
///
/// An empty list is an [`Error::InvalidRequest`]; one bad entry rejects the
/// whole list with [`Error::InvalidEmail`].
pub fn validate_all<S: AsRef<str>>(emails: &[S]) -> Result<Vec<Email>> {
  if emails.is_empty() {
    return Err(Error::InvalidRequest("email list is empty".into()));
  }
  emails.iter().map(|e| validate(e.as_ref())).collect()
}
