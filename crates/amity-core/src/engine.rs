//! [`RelationshipEngine`]: the business operations over a
//! [`RelationshipStore`].
//!
//! Each operation validates its request completely before touching the store,
//! then issues exactly one store call. Validation failures are therefore free
//! of side effects, and storage failures are returned to the caller as
//! [`Error::Storage`] without retry.

use std::sync::Arc;

use tracing::debug;

use crate::{
  Error, Result,
  email::{self, Email},
  mention,
  request::{
    BlockSubscribeRequest, BlockSubscribeResponse, BroadcastRequest,
    BroadcastResponse, CommonFriendListRequest, CommonFriendListResponse,
    CreateUserRequest, CreateUserResponse, FriendConnectionRequest,
    FriendConnectionResponse, FriendListRequest, FriendListResponse,
    SubscribeRequest, SubscribeResponse,
  },
  sets,
  store::RelationshipStore,
};

/// The relationship query engine.
///
/// Holds nothing but the injected store handle; cloning is cheap and clones
/// share the same store.
pub struct RelationshipEngine<S> {
  store: Arc<S>,
}

impl<S> Clone for RelationshipEngine<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: RelationshipStore> RelationshipEngine<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// The underlying store.
  pub fn store(&self) -> &S { &self.store }

  // ── Accounts ──────────────────────────────────────────────────────────────

  pub async fn create_user(
    &self,
    req: CreateUserRequest,
  ) -> Result<CreateUserResponse> {
    let email = email::validate(&req.email)?;
    debug!(%email, "creating user account");

    self
      .store
      .create_user_account(email)
      .await
      .map_err(Error::storage)?;
    Ok(CreateUserResponse { success: true })
  }

  // ── Friends ───────────────────────────────────────────────────────────────

  /// Connect the two addresses in `req.friends` symmetrically.
  pub async fn create_friend_connection(
    &self,
    req: FriendConnectionRequest,
  ) -> Result<FriendConnectionResponse> {
    if req.friends.len() != 2 {
      return Err(Error::InvalidRequest(format!(
        "expected exactly 2 friends, got {}",
        req.friends.len()
      )));
    }
    let [a, b] = distinct_pair(&req.friends[0], &req.friends[1])?;
    debug!(%a, %b, "creating friend connection");

    self
      .store
      .upsert_friend_edge(a, b)
      .await
      .map_err(Error::storage)?;
    Ok(FriendConnectionResponse { success: true })
  }

  pub async fn friends(&self, req: FriendListRequest) -> Result<FriendListResponse> {
    let email = email::validate(&req.email)?;
    debug!(%email, "listing friends");

    let friends = self
      .store
      .find_friends(email)
      .await
      .map_err(Error::storage)?;
    Ok(FriendListResponse::new(sets::dedupe(friends)))
  }

  /// Friends shared by every address in the request. At least two distinct
  /// addresses are required.
  pub async fn common_friends(
    &self,
    req: CommonFriendListRequest,
  ) -> Result<CommonFriendListResponse> {
    let emails = email::validate_all(&req.friends)?;
    if emails.len() < 2 {
      return Err(Error::InvalidRequest(format!(
        "expected at least 2 emails, got {}",
        emails.len()
      )));
    }
    if sets::has_duplicates(&emails) {
      return Err(Error::InvalidRequest("emails must be distinct".into()));
    }
    debug!(count = emails.len(), "listing common friends");

    let found = self
      .store
      .find_common_friends(emails.clone())
      .await
      .map_err(Error::storage)?;
    let common = sets::difference(sets::dedupe(found), &emails);
    Ok(CommonFriendListResponse::new(common))
  }

  // ── Subscriptions ─────────────────────────────────────────────────────────

  /// `requestor` starts receiving `target`'s broadcasts. Idempotent.
  ///
  /// Subscribing to oneself is accepted and has no visible effect, since a
  /// sender never receives its own broadcast.
  pub async fn subscribe(&self, req: SubscribeRequest) -> Result<SubscribeResponse> {
    let subscriber = email::validate(&req.requestor)?;
    let publisher = email::validate(&req.target)?;
    debug!(%subscriber, %publisher, "subscribing");

    self
      .store
      .upsert_subscription(subscriber, publisher)
      .await
      .map_err(Error::storage)?;
    Ok(SubscribeResponse { success: true })
  }

  /// `requestor` stops receiving any broadcast from `target`, whether it
  /// would arrive through friendship, subscription, or a mention. Idempotent.
  pub async fn block_subscribe(
    &self,
    req: BlockSubscribeRequest,
  ) -> Result<BlockSubscribeResponse> {
    let blocker = email::validate(&req.requestor)?;
    let publisher = email::validate(&req.target)?;
    debug!(%blocker, %publisher, "blocking broadcasts");

    self
      .store
      .upsert_subscribe_block(blocker, publisher)
      .await
      .map_err(Error::storage)?;
    Ok(BlockSubscribeResponse { success: true })
  }

  // ── Broadcasts ────────────────────────────────────────────────────────────

  /// Everyone who receives a broadcast of `req.text` from `req.sender`:
  /// active friends, active subscribers, and mentioned addresses, minus
  /// anyone who blocked the sender and minus the sender itself.
  pub async fn broadcast_recipients(
    &self,
    req: BroadcastRequest,
  ) -> Result<BroadcastResponse> {
    let sender = email::validate(&req.sender)?;
    let mentioned = mention::mentions(&req.text);

    let audience = self
      .store
      .find_broadcast_audience(sender.clone())
      .await
      .map_err(Error::storage)?;

    let candidates = sets::dedupe(
      audience
        .friends
        .into_iter()
        .chain(audience.subscribers)
        .chain(mentioned),
    );
    let excluded = audience.blocked_by.iter().chain(std::iter::once(&sender));
    let recipients = sets::difference(candidates, excluded);

    debug!(%sender, recipients = recipients.len(), "computed broadcast recipients");
    Ok(BroadcastResponse { success: true, recipients })
  }
}

/// Validate two addresses that must differ from each other.
fn distinct_pair(a: &str, b: &str) -> Result<[Email; 2]> {
  let a = email::validate(a)?;
  let b = email::validate(b)?;
  if a == b {
    return Err(Error::InvalidRequest(format!(
      "{a} cannot form a relationship with itself"
    )));
  }
  Ok([a, b])
}
