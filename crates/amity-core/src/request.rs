//! Request and response value objects exchanged with the engine.
//!
//! Requests carry raw strings; the engine validates them. Every request field
//! defaults to empty so that a missing JSON key surfaces as a validation
//! error from the engine rather than a binding error.

use serde::{Deserialize, Serialize};

use crate::email::Email;

// ─── Accounts ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
  pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserResponse {
  pub success: bool,
}

// ─── Friends ─────────────────────────────────────────────────────────────────

/// Connect exactly two addresses as friends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FriendConnectionRequest {
  pub friends: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendConnectionResponse {
  pub success: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FriendListRequest {
  pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendListResponse {
  pub success: bool,
  pub friends: Vec<Email>,
  pub count:   usize,
}

impl FriendListResponse {
  pub fn new(friends: Vec<Email>) -> Self {
    Self { success: true, count: friends.len(), friends }
  }
}

/// Friends shared by every address in `friends` (at least two).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonFriendListRequest {
  pub friends: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonFriendListResponse {
  pub success: bool,
  pub friends: Vec<Email>,
  pub count:   usize,
}

impl CommonFriendListResponse {
  pub fn new(friends: Vec<Email>) -> Self {
    Self { success: true, count: friends.len(), friends }
  }
}

// ─── Subscriptions ───────────────────────────────────────────────────────────

/// `requestor` subscribes to `target`'s broadcasts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscribeRequest {
  pub requestor: String,
  pub target:    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeResponse {
  pub success: bool,
}

/// `requestor` stops receiving `target`'s broadcasts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockSubscribeRequest {
  pub requestor: String,
  pub target:    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSubscribeResponse {
  pub success: bool,
}

// ─── Broadcasts ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastRequest {
  pub sender: String,
  pub text:   String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastResponse {
  pub success:    bool,
  pub recipients: Vec<Email>,
}
