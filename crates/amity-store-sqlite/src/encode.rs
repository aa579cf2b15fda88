//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and addresses as written.
//! Addresses read back from the database are re-validated.

use amity_core::{
  Email,
  email,
  relationship::{Relationship, UserAccount},
};
use chrono::{DateTime, Utc};

use crate::{Error, Result};

// ─── Email ────────────────────────────────────────────────────────────────────

pub fn decode_email(s: &str) -> Result<Email> { Ok(email::validate(s)?) }

pub fn decode_emails(raw: Vec<String>) -> Result<Vec<Email>> {
  raw.iter().map(|s| decode_email(s)).collect()
}

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw row types ────────────────────────────────────────────────────────────

/// A `relationship` row as read from SQLite, before validation.
pub struct RawRelationship {
  pub requestor:         String,
  pub target:            String,
  pub is_friend:         bool,
  pub friend_blocked:    bool,
  pub subscribed:        bool,
  pub subscribe_blocked: bool,
}

impl RawRelationship {
  pub const COLUMNS: &'static str =
    "requestor, target, is_friend, friend_blocked, subscribed, subscribe_blocked";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      requestor:         row.get(0)?,
      target:            row.get(1)?,
      is_friend:         row.get(2)?,
      friend_blocked:    row.get(3)?,
      subscribed:        row.get(4)?,
      subscribe_blocked: row.get(5)?,
    })
  }

  pub fn into_relationship(self) -> Result<Relationship> {
    Ok(Relationship {
      requestor:         decode_email(&self.requestor)?,
      target:            decode_email(&self.target)?,
      is_friend:         self.is_friend,
      friend_blocked:    self.friend_blocked,
      subscribed:        self.subscribed,
      subscribe_blocked: self.subscribe_blocked,
    })
  }
}

/// A `user_account` row as read from SQLite.
pub struct RawAccount {
  pub user_email: String,
  pub created_at: String,
}

impl RawAccount {
  pub fn into_account(self) -> Result<UserAccount> {
    Ok(UserAccount {
      email:      decode_email(&self.user_email)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// The three address lists behind a broadcast, before validation.
pub struct RawAudience {
  pub friends:     Vec<String>,
  pub subscribers: Vec<String>,
  pub blocked_by:  Vec<String>,
}
