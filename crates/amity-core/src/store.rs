//! The `RelationshipStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `amity-store-sqlite`).
//! The engine depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  email::Email,
  relationship::{BroadcastAudience, Relationship, UserAccount},
};

/// Abstraction over the relationship table and the account list.
///
/// Every method is one atomic unit of work: multi-row writes either land
/// completely or not at all. Writes are upserts keyed by
/// `(requestor, target)` and only ever set facets to `true`.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RelationshipStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Accounts ──────────────────────────────────────────────────────────

  /// Register `email`. Registering an existing address returns the stored
  /// account unchanged.
  fn create_user_account(
    &self,
    email: Email,
  ) -> impl Future<Output = Result<UserAccount, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Set `is_friend` on both `(a, b)` and `(b, a)` in one transaction.
  fn upsert_friend_edge(
    &self,
    a: Email,
    b: Email,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Set `subscribed` on `(subscriber, publisher)`.
  fn upsert_subscription(
    &self,
    subscriber: Email,
    publisher: Email,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Set `subscribe_blocked` on `(blocker, publisher)`.
  fn upsert_subscribe_block(
    &self,
    blocker: Email,
    publisher: Email,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Point lookup of the `(requestor, target)` row.
  fn get_relationship(
    &self,
    requestor: Email,
    target: Email,
  ) -> impl Future<Output = Result<Option<Relationship>, Self::Error>> + Send + '_;

  /// Active friends of `email`.
  ///
  /// `X` is an active friend of `E` when either row of the pair has
  /// `is_friend` and neither row has `friend_blocked`.
  fn find_friends(
    &self,
    email: Email,
  ) -> impl Future<Output = Result<Vec<Email>, Self::Error>> + Send + '_;

  /// Addresses that are active friends of *every* member of `emails` and are
  /// not themselves members. `emails` is non-empty and duplicate-free.
  fn find_common_friends(
    &self,
    emails: Vec<Email>,
  ) -> impl Future<Output = Result<Vec<Email>, Self::Error>> + Send + '_;

  /// Friends, subscribers, and blockers of `sender`, read in one snapshot.
  fn find_broadcast_audience(
    &self,
    sender: Email,
  ) -> impl Future<Output = Result<BroadcastAudience, Self::Error>> + Send + '_;
}
