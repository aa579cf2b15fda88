//! Integration tests for `SqliteStore` against an in-memory database.

use amity_core::{
  Email,
  email,
  request::{
    BlockSubscribeRequest, BroadcastRequest, CommonFriendListRequest,
    FriendConnectionRequest, FriendListRequest, SubscribeRequest,
  },
  store::RelationshipStore,
  RelationshipEngine,
};
use std::sync::Arc;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn e(s: &str) -> Email { email::validate(s).unwrap() }

fn strs(v: &[Email]) -> Vec<&str> { v.iter().map(Email::as_str).collect() }

fn sorted(v: Vec<Email>) -> Vec<String> {
  let mut v: Vec<String> = v.into_iter().map(Email::into_string).collect();
  v.sort();
  v
}

/// Set `friend_blocked` directly; no public operation writes it.
async fn hide_friendship(s: &SqliteStore, requestor: &str, target: &str) {
  let (requestor, target) = (requestor.to_owned(), target.to_owned());
  s.conn_for_tests()
    .call(move |conn| {
      conn.execute(
        "UPDATE relationship SET friend_blocked = 1 WHERE requestor = ?1 AND target = ?2",
        rusqlite::params![requestor, target],
      )?;
      Ok(())
    })
    .await
    .unwrap();
}

// ─── Accounts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_account_is_idempotent() {
  let s = store().await;

  let first = s.create_user_account(e("alice@x.com")).await.unwrap();
  assert_eq!(first.email.as_str(), "alice@x.com");

  let again = s.create_user_account(e("alice@x.com")).await.unwrap();
  assert_eq!(again, first);
}

// ─── Friend edges ────────────────────────────────────────────────────────────

#[tokio::test]
async fn friend_edge_is_written_both_ways() {
  let s = store().await;
  s.upsert_friend_edge(e("alice@x.com"), e("bob@x.com")).await.unwrap();

  let fwd = s.get_relationship(e("alice@x.com"), e("bob@x.com")).await.unwrap().unwrap();
  let rev = s.get_relationship(e("bob@x.com"), e("alice@x.com")).await.unwrap().unwrap();
  assert!(fwd.is_friend && rev.is_friend);
  assert!(!fwd.subscribed && !fwd.friend_blocked && !fwd.subscribe_blocked);

  assert_eq!(strs(&s.find_friends(e("alice@x.com")).await.unwrap()), ["bob@x.com"]);
  assert_eq!(strs(&s.find_friends(e("bob@x.com")).await.unwrap()), ["alice@x.com"]);
}

#[tokio::test]
async fn repeated_friend_edge_updates_in_place() {
  let s = store().await;
  s.upsert_subscription(e("alice@x.com"), e("bob@x.com")).await.unwrap();
  s.upsert_friend_edge(e("alice@x.com"), e("bob@x.com")).await.unwrap();
  s.upsert_friend_edge(e("bob@x.com"), e("alice@x.com")).await.unwrap();

  let row = s.get_relationship(e("alice@x.com"), e("bob@x.com")).await.unwrap().unwrap();
  assert!(row.is_friend);
  // Earlier facets survive the upsert.
  assert!(row.subscribed);
  assert_eq!(s.find_friends(e("alice@x.com")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn missing_relationship_is_none() {
  let s = store().await;
  let row = s.get_relationship(e("a@x.com"), e("b@x.com")).await.unwrap();
  assert!(row.is_none());
}

#[tokio::test]
async fn hidden_friendship_is_invisible_from_both_sides() {
  let s = store().await;
  s.upsert_friend_edge(e("alice@x.com"), e("bob@x.com")).await.unwrap();
  s.upsert_friend_edge(e("alice@x.com"), e("carol@x.com")).await.unwrap();
  hide_friendship(&s, "alice@x.com", "bob@x.com").await;

  assert_eq!(strs(&s.find_friends(e("alice@x.com")).await.unwrap()), ["carol@x.com"]);
  assert!(s.find_friends(e("bob@x.com")).await.unwrap().is_empty());
}

#[tokio::test]
async fn self_subscription_is_stored() {
  let s = store().await;
  s.upsert_subscription(e("alice@x.com"), e("alice@x.com")).await.unwrap();

  let row = s.get_relationship(e("alice@x.com"), e("alice@x.com")).await.unwrap().unwrap();
  assert!(row.subscribed);
  assert!(!row.is_friend);

  let audience = s.find_broadcast_audience(e("alice@x.com")).await.unwrap();
  assert_eq!(strs(&audience.subscribers), ["alice@x.com"]);
}

// ─── Common friends ──────────────────────────────────────────────────────────

#[tokio::test]
async fn common_friends_use_full_threshold() {
  let s = store().await;
  for m in ["a@x.com", "b@x.com", "c@x.com"] {
    s.upsert_friend_edge(e(m), e("dave@x.com")).await.unwrap();
  }
  s.upsert_friend_edge(e("a@x.com"), e("erin@x.com")).await.unwrap();
  s.upsert_friend_edge(e("b@x.com"), e("erin@x.com")).await.unwrap();
  s.upsert_friend_edge(e("a@x.com"), e("b@x.com")).await.unwrap();

  let three = s
    .find_common_friends(vec![e("a@x.com"), e("b@x.com"), e("c@x.com")])
    .await
    .unwrap();
  assert_eq!(strs(&three), ["dave@x.com"]);

  let two = s
    .find_common_friends(vec![e("b@x.com"), e("a@x.com")])
    .await
    .unwrap();
  assert_eq!(strs(&two), ["dave@x.com", "erin@x.com"]);
}

#[tokio::test]
async fn common_friends_skip_hidden_edges() {
  let s = store().await;
  s.upsert_friend_edge(e("a@x.com"), e("dave@x.com")).await.unwrap();
  s.upsert_friend_edge(e("b@x.com"), e("dave@x.com")).await.unwrap();
  hide_friendship(&s, "dave@x.com", "b@x.com").await;

  let found = s
    .find_common_friends(vec![e("a@x.com"), e("b@x.com")])
    .await
    .unwrap();
  assert!(found.is_empty());
}

// ─── Broadcast audience ──────────────────────────────────────────────────────

#[tokio::test]
async fn audience_splits_friends_subscribers_and_blockers() {
  let s = store().await;
  s.upsert_friend_edge(e("bob@x.com"), e("alice@x.com")).await.unwrap();
  s.upsert_subscription(e("carol@x.com"), e("alice@x.com")).await.unwrap();
  s.upsert_subscription(e("dave@x.com"), e("alice@x.com")).await.unwrap();
  s.upsert_subscribe_block(e("dave@x.com"), e("alice@x.com")).await.unwrap();
  // Alice subscribing to Erin does not make Erin hear Alice.
  s.upsert_subscription(e("alice@x.com"), e("erin@x.com")).await.unwrap();

  let audience = s.find_broadcast_audience(e("alice@x.com")).await.unwrap();
  assert_eq!(strs(&audience.friends), ["bob@x.com"]);
  assert_eq!(strs(&audience.subscribers), ["carol@x.com"]);
  assert_eq!(strs(&audience.blocked_by), ["dave@x.com"]);
}

#[tokio::test]
async fn subscription_and_block_are_idempotent() {
  let s = store().await;
  for _ in 0..2 {
    s.upsert_subscription(e("a@x.com"), e("b@x.com")).await.unwrap();
    s.upsert_subscribe_block(e("a@x.com"), e("b@x.com")).await.unwrap();
  }
  let row = s.get_relationship(e("a@x.com"), e("b@x.com")).await.unwrap().unwrap();
  assert!(row.subscribed && row.subscribe_blocked);
  assert!(!row.is_active_subscription());
}

// ─── Through the engine ──────────────────────────────────────────────────────

#[tokio::test]
async fn engine_end_to_end() {
  let engine = RelationshipEngine::new(Arc::new(store().await));

  for pair in [["alice@x.com", "dave@x.com"], ["carol@x.com", "dave@x.com"], ["alice@x.com", "bob@x.com"]] {
    engine
      .create_friend_connection(FriendConnectionRequest {
        friends: pair.iter().map(|s| s.to_string()).collect(),
      })
      .await
      .unwrap();
  }

  let friends = engine
    .friends(FriendListRequest { email: "alice@x.com".into() })
    .await
    .unwrap();
  assert_eq!(friends.count, 2);
  assert_eq!(sorted(friends.friends), ["bob@x.com", "dave@x.com"]);

  let common = engine
    .common_friends(CommonFriendListRequest {
      friends: vec!["alice@x.com".into(), "carol@x.com".into()],
    })
    .await
    .unwrap();
  assert_eq!(strs(&common.friends), ["dave@x.com"]);

  engine
    .subscribe(SubscribeRequest { requestor: "erin@x.com".into(), target: "alice@x.com".into() })
    .await
    .unwrap();
  engine
    .block_subscribe(BlockSubscribeRequest {
      requestor: "bob@x.com".into(),
      target:    "alice@x.com".into(),
    })
    .await
    .unwrap();

  let resp = engine
    .broadcast_recipients(BroadcastRequest {
      sender: "alice@x.com".into(),
      text:   "hello frank@x.com, bob@x.com and alice@x.com".into(),
    })
    .await
    .unwrap();
  assert_eq!(
    sorted(resp.recipients),
    ["dave@x.com", "erin@x.com", "frank@x.com"]
  );
}
