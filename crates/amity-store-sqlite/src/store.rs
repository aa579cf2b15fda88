//! [`SqliteStore`]: the SQLite implementation of [`RelationshipStore`].

use std::path::Path;

use amity_core::{
  Email,
  relationship::{BroadcastAudience, Relationship, UserAccount},
  store::RelationshipStore,
};
use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::debug;

use crate::{
  encode::{decode_emails, encode_dt, RawAccount, RawAudience, RawRelationship},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Amity relationship store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted, and all
/// calls are serialised on the connection's worker thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  #[cfg(test)]
  pub(crate) fn conn_for_tests(&self) -> &tokio_rusqlite::Connection { &self.conn }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Set one boolean facet on `(requestor, target)`, creating the row if
  /// needed. `facet` is always one of the fixed column names below.
  async fn upsert_facet(
    &self,
    facet:     &'static str,
    requestor: Email,
    target:    Email,
  ) -> Result<()> {
    let sql = format!(
      "INSERT INTO relationship (requestor, target, {facet}) VALUES (?1, ?2, 1)
       ON CONFLICT (requestor, target) DO UPDATE SET {facet} = 1"
    );
    let requestor = requestor.into_string();
    let target    = target.into_string();

    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params![requestor, target])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Run a single-column query returning addresses.
fn query_emails<P: rusqlite::Params>(
  conn:   &rusqlite::Connection,
  sql:    &str,
  params: P,
) -> rusqlite::Result<Vec<String>> {
  let mut stmt = conn.prepare(sql)?;
  stmt
    .query_map(params, |row| row.get(0))?
    .collect::<rusqlite::Result<Vec<_>>>()
}

// ─── RelationshipStore impl ──────────────────────────────────────────────────

impl RelationshipStore for SqliteStore {
  type Error = crate::Error;

  // ── Accounts ──────────────────────────────────────────────────────────────

  async fn create_user_account(&self, email: Email) -> Result<UserAccount> {
    let email_str = email.into_string();
    let at_str    = encode_dt(Utc::now());

    let raw: RawAccount = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO user_account (user_email, created_at) VALUES (?1, ?2)
           ON CONFLICT (user_email) DO NOTHING",
          rusqlite::params![email_str, at_str],
        )?;
        let raw = tx.query_row(
          "SELECT user_email, created_at FROM user_account WHERE user_email = ?1",
          rusqlite::params![email_str],
          |row| {
            Ok(RawAccount {
              user_email: row.get(0)?,
              created_at: row.get(1)?,
            })
          },
        )?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.into_account()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn upsert_friend_edge(&self, a: Email, b: Email) -> Result<()> {
    let a = a.into_string();
    let b = b.into_string();
    debug!(%a, %b, "upserting friend edge");

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO relationship (requestor, target, is_friend)
           VALUES (?1, ?2, 1), (?2, ?1, 1)
           ON CONFLICT (requestor, target) DO UPDATE SET is_friend = 1",
          rusqlite::params![a, b],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn upsert_subscription(&self, subscriber: Email, publisher: Email) -> Result<()> {
    self.upsert_facet("subscribed", subscriber, publisher).await
  }

  async fn upsert_subscribe_block(&self, blocker: Email, publisher: Email) -> Result<()> {
    self.upsert_facet("subscribe_blocked", blocker, publisher).await
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_relationship(
    &self,
    requestor: Email,
    target:    Email,
  ) -> Result<Option<Relationship>> {
    let requestor = requestor.into_string();
    let target    = target.into_string();

    let raw: Option<RawRelationship> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {} FROM relationship WHERE requestor = ?1 AND target = ?2",
              RawRelationship::COLUMNS
            ),
            rusqlite::params![requestor, target],
            RawRelationship::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawRelationship::into_relationship).transpose()
  }

  async fn find_friends(&self, email: Email) -> Result<Vec<Email>> {
    let email_str = email.into_string();

    let raw = self
      .conn
      .call(move |conn| {
        Ok(query_emails(
          conn,
          "SELECT friend FROM active_friendship WHERE email = ?1 ORDER BY friend",
          rusqlite::params![email_str],
        )?)
      })
      .await?;

    decode_emails(raw)
  }

  async fn find_common_friends(&self, emails: Vec<Email>) -> Result<Vec<Email>> {
    if emails.is_empty() {
      return Ok(Vec::new());
    }
    let n = emails.len();
    let placeholders = (1..=n).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ");
    // A candidate must be an active friend of every input, so the number of
    // distinct inputs it is linked to has to reach `n`.
    let sql = format!(
      "SELECT friend FROM active_friendship
        WHERE email IN ({placeholders})
          AND friend NOT IN ({placeholders})
        GROUP BY friend
       HAVING COUNT(DISTINCT email) = {n}
        ORDER BY friend"
    );
    let params: Vec<String> = emails.into_iter().map(Email::into_string).collect();

    let raw = self
      .conn
      .call(move |conn| {
        Ok(query_emails(conn, &sql, rusqlite::params_from_iter(params))?)
      })
      .await?;

    decode_emails(raw)
  }

  async fn find_broadcast_audience(&self, sender: Email) -> Result<BroadcastAudience> {
    let sender_str = sender.into_string();

    let raw: RawAudience = self
      .conn
      .call(move |conn| {
        // One read transaction so the three lists agree with each other.
        let tx = conn.transaction()?;
        let friends = query_emails(
          &tx,
          "SELECT friend FROM active_friendship WHERE email = ?1",
          rusqlite::params![sender_str],
        )?;
        let subscribers = query_emails(
          &tx,
          "SELECT requestor FROM relationship
            WHERE target = ?1 AND subscribed = 1 AND subscribe_blocked = 0",
          rusqlite::params![sender_str],
        )?;
        let blocked_by = query_emails(
          &tx,
          "SELECT requestor FROM relationship
            WHERE target = ?1 AND subscribe_blocked = 1",
          rusqlite::params![sender_str],
        )?;
        tx.commit()?;
        Ok(RawAudience { friends, subscribers, blocked_by })
      })
      .await?;

    Ok(BroadcastAudience {
      friends:     decode_emails(raw.friends)?,
      subscribers: decode_emails(raw.subscribers)?,
      blocked_by:  decode_emails(raw.blocked_by)?,
    })
  }
}
