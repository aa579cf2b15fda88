//! Relationship records and the read models derived from them.
//!
//! A relationship is a directed edge `requestor → target` keyed by the pair.
//! Rows are created on first interaction and never deleted; each facet only
//! ever goes from `false` to `true`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::email::Email;

// ─── Relationship ────────────────────────────────────────────────────────────

/// One directed row of the relationship table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
  pub requestor:         Email,
  pub target:            Email,
  /// Mutual friendship; always written on both `(a, b)` and `(b, a)`.
  pub is_friend:         bool,
  /// The requestor has hidden this friendship. Suppresses it from friend
  /// listings and friend-based broadcast delivery in both directions.
  pub friend_blocked:    bool,
  /// The requestor receives the target's broadcasts.
  pub subscribed:        bool,
  /// The requestor refuses every broadcast from the target.
  pub subscribe_blocked: bool,
}

impl Relationship {
  /// A row with every facet unset.
  pub fn new(requestor: Email, target: Email) -> Self {
    Self {
      requestor,
      target,
      is_friend: false,
      friend_blocked: false,
      subscribed: false,
      subscribe_blocked: false,
    }
  }

  /// `true` if this row alone makes `requestor` a broadcast subscriber of
  /// `target`.
  pub fn is_active_subscription(&self) -> bool {
    self.subscribed && !self.subscribe_blocked
  }
}

// ─── Accounts ────────────────────────────────────────────────────────────────

/// A registered address. Accounts are independent of relationship rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
  pub email:      Email,
  /// Set by the store on first registration; never changes.
  pub created_at: DateTime<Utc>,
}

// ─── Broadcast audience ──────────────────────────────────────────────────────

/// Everything the store knows about who may hear from a sender. The engine
/// merges this with the mentions found in the broadcast text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastAudience {
  /// Active friends of the sender.
  pub friends:     Vec<Email>,
  /// Addresses subscribed to the sender that have not blocked it.
  pub subscribers: Vec<Email>,
  /// Addresses that have blocked the sender's broadcasts.
  pub blocked_by:  Vec<Email>,
}
